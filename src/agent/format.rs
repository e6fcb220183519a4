//! Reply text in English and Arabic.

use std::fmt::Write;

use crate::otp::{Itinerary, Leg};
use crate::types::{Language, ResolvedPlace};

/// Arabic name for an OTP mode; unknown modes are returned unchanged
pub fn arabic_mode_name(mode: &str) -> &str {
    match mode {
        "BUS" => "أتوبيس",
        "TRAM" => "ترام",
        "RAIL" => "قطار",
        "SUBWAY" => "مترو",
        "FERRY" => "عبارة",
        "WALK" => "مشي",
        other => other,
    }
}

fn mode_label(mode: &str, language: Language) -> &str {
    match language {
        Language::Arabic => arabic_mode_name(mode),
        Language::English => mode,
    }
}

fn leg_vehicle(leg: &Leg, language: Language) -> String {
    let mode = mode_label(&leg.mode, language);
    match leg.route {
        Some(ref route) => format!("{} {}", mode, route),
        None => mode.to_string(),
    }
}

/// Asked when origin and destination could not be extracted
pub fn clarification(language: Language) -> String {
    match language {
        Language::Arabic => "من فضلك حدد نقطة البداية والوجهة بوضوح. مثال: 'عايز أروح من الفلكي لسيدي جابر' أو 'من فيكتوريا إلى المنتزه'".to_string(),
        Language::English => "Please specify both starting point and destination clearly. Example: 'I want to go from Falaki to Sidi Gaber' or 'from Victoria to Montazah'".to_string(),
    }
}

/// A place name that did not resolve to any stop
pub fn not_found(place: &str, language: Language) -> String {
    match language {
        Language::Arabic => format!(
            "عذراً، لم أتمكن من العثور على موقع: **{}**. تأكد من كتابة الاسم بطريقة صحيحة.",
            place
        ),
        Language::English => format!(
            "Sorry, I couldn't find the location: **{}**. Please check the spelling.",
            place
        ),
    }
}

/// Full plan for the first itinerary, alternatives as one-liners.
///
/// `itineraries` must not be empty.
pub fn trip_plan(
    itineraries: &[Itinerary],
    from: &ResolvedPlace,
    to: &ResolvedPlace,
    language: Language,
) -> String {
    let Some(best) = itineraries.first() else {
        return fallback(from, to, language);
    };

    let mut out = String::new();
    match language {
        Language::Arabic => {
            let _ = writeln!(out, "🚌 **خطة الرحلة من {} إلى {}**\n", from.name, to.name);
            let _ = writeln!(out, "⏱️ **الوقت الكلي:** {} دقيقة", best.total_duration_min);
            let _ = writeln!(out, "📏 **المسافة الكلية:** {:.1} كم", best.total_distance_km);
            let _ = writeln!(out, "🚶 **وقت المشي:** {} دقيقة", best.total_walking_time_min);
            let _ = writeln!(out, "🔄 **عدد التحويلات:** {}\n", best.transfers);
            let _ = writeln!(out, "**تفاصيل الرحلة:**");
        }
        Language::English => {
            let _ = writeln!(out, "🚌 **Trip Plan from {} to {}**\n", from.name, to.name);
            let _ = writeln!(out, "⏱️ **Total Time:** {} minutes", best.total_duration_min);
            let _ = writeln!(out, "📏 **Total Distance:** {:.1} km", best.total_distance_km);
            let _ = writeln!(out, "🚶 **Walking Time:** {} minutes", best.total_walking_time_min);
            let _ = writeln!(out, "🔄 **Transfers:** {}\n", best.transfers);
            let _ = writeln!(out, "**Trip Details:**");
        }
    }

    for (i, leg) in best.legs.iter().enumerate() {
        let n = i + 1;
        let line = match (language, leg.is_walk()) {
            (Language::Arabic, true) => format!(
                "{}. 🚶 امشي من **{}** إلى **{}** ({} دق - {:.1} كم)",
                n, leg.from_name, leg.to_name, leg.duration_min, leg.distance_km
            ),
            (Language::Arabic, false) => format!(
                "{}. 🚌 اركب {} من **{}** إلى **{}** ({} دق)",
                n,
                leg_vehicle(leg, language),
                leg.from_name,
                leg.to_name,
                leg.duration_min
            ),
            (Language::English, true) => format!(
                "{}. 🚶 Walk from **{}** to **{}** ({} min - {:.1} km)",
                n, leg.from_name, leg.to_name, leg.duration_min, leg.distance_km
            ),
            (Language::English, false) => {
                let headsign = leg
                    .headsign
                    .as_ref()
                    .map(|h| format!(" toward {}", h))
                    .unwrap_or_default();
                format!(
                    "{}. 🚌 Take {}{} from **{}** to **{}** ({} min)",
                    n,
                    leg_vehicle(leg, language),
                    headsign,
                    leg.from_name,
                    leg.to_name,
                    leg.duration_min
                )
            }
        };
        let _ = writeln!(out, "{}", line);
    }

    let modes: Vec<String> = best
        .transit_modes()
        .iter()
        .map(|m| mode_label(m, language).to_string())
        .collect();
    if !modes.is_empty() {
        match language {
            Language::Arabic => {
                let _ = write!(out, "\n**وسائل النقل المستخدمة:** {}", modes.join("، "));
            }
            Language::English => {
                let _ = write!(out, "\n**Transit Modes Used:** {}", modes.join(", "));
            }
        }
    }

    if itineraries.len() > 1 {
        match language {
            Language::Arabic => {
                let _ = write!(out, "\n\n**خيارات أخرى:**");
            }
            Language::English => {
                let _ = write!(out, "\n\n**Other Options:**");
            }
        }
        for alt in &itineraries[1..] {
            let line = match language {
                Language::Arabic => {
                    let modes: Vec<&str> = alt
                        .legs
                        .iter()
                        .filter(|l| !l.is_walk())
                        .map(|l| arabic_mode_name(&l.mode))
                        .collect();
                    let route = if modes.is_empty() {
                        arabic_mode_name("WALK").to_string()
                    } else {
                        modes.join(" ← ")
                    };
                    format!(
                        "- {} دقيقة، {} تحويلة: {}",
                        alt.total_duration_min, alt.transfers, route
                    )
                }
                Language::English => {
                    format!("- {} min: {}", alt.total_duration_min, alt.summary())
                }
            };
            let _ = write!(out, "\n{}", line);
        }
    }

    out.trim_end().to_string()
}

/// Generic advice when the planner is unavailable or finds nothing
pub fn fallback(from: &ResolvedPlace, to: &ResolvedPlace, language: Language) -> String {
    match language {
        Language::Arabic => format!(
            "🚌 **خطة الرحلة من {from} إلى {to}**

📍 **من:** {from} ({flat:.4}, {flon:.4})
📍 **إلى:** {to} ({tlat:.4}, {tlon:.4})

**الخيارات المتاحة:**
1. **أتوبيس:** استخدم شبكة الأتوبيسات العامة
2. **ترام:** استخدم ترام الإسكندرية (إذا كان متاحاً في المنطقة)
3. **ميكروباص:** وسيلة نقل سريعة ومرنة
4. **تاكسي:** للراحة والسرعة

📱 **نصائح:**
- استخدم تطبيق المواصلات الرسمي للمواعيد الدقيقة
- تحقق من مواعيد التشغيل قبل السفر
- احتفظ بخيارات بديلة للطوارئ

⚠️ **ملاحظة:** هذه معلومات أساسية. لتفاصيل الطرق الدقيقة والمواعيد، يرجى التأكد من تشغيل خادم OTP المحلي.",
            from = from.name,
            to = to.name,
            flat = from.lat,
            flon = from.lon,
            tlat = to.lat,
            tlon = to.lon,
        ),
        Language::English => format!(
            "🚌 **Trip Plan from {from} to {to}**

📍 **From:** {from} ({flat:.4}, {flon:.4})
📍 **To:** {to} ({tlat:.4}, {tlon:.4})

**Available Options:**
1. **Bus:** Use the public bus network
2. **Tram:** Use Alexandria tram system (if available in the area)
3. **Microbus:** Fast and flexible transport option
4. **Taxi:** For comfort and speed

📱 **Tips:**
- Use the official transport app for accurate schedules
- Check operating hours before traveling
- Keep backup options for emergencies

⚠️ **Note:** This is basic information. For detailed routes and schedules, please ensure your local OTP server is running.",
            from = from.name,
            to = to.name,
            flat = from.lat,
            flon = from.lon,
            tlat = to.lat,
            tlon = to.lon,
        ),
    }
}

/// Example queries shown by the CLI `help` command and the web page
pub const EXAMPLE_QUERIES: &[&str] = &[
    "عايز أروح من الفلكي لسيدي جابر",
    "من المنشية للسيوف",
    "ازاي أروح من فيكتوريا للمنتزه",
    "I want to go from Victoria to Sidi Gaber",
    "How do I go from Falaki to Montazah?",
    "Route from Raml Station to Smouha",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, lat: f64, lon: f64) -> ResolvedPlace {
        ResolvedPlace {
            query: name.to_string(),
            name: name.to_string(),
            lat,
            lon,
            stop_id: "1".to_string(),
        }
    }

    fn leg(mode: &str, route: Option<&str>, from: &str, to: &str, minutes: u32) -> Leg {
        Leg {
            mode: mode.to_string(),
            from_name: from.to_string(),
            to_name: to.to_string(),
            duration_min: minutes,
            distance_km: 1.25,
            route: route.map(str::to_string),
            route_short_name: None,
            route_long_name: None,
            headsign: None,
            agency_name: None,
            route_type: None,
            transit: mode != "WALK",
            start_time: None,
            end_time: None,
        }
    }

    fn itinerary(minutes: u32, legs: Vec<Leg>) -> Itinerary {
        Itinerary {
            total_duration_min: minutes,
            total_distance_km: 6.4,
            total_walking_time_min: 7,
            transfers: 0,
            legs,
            start_time: None,
            end_time: None,
        }
    }

    fn sample() -> Vec<Itinerary> {
        vec![
            itinerary(
                25,
                vec![
                    leg("WALK", None, "Origin", "Victoria Station", 4),
                    leg("BUS", Some("12"), "Victoria Station", "Raml Station", 21),
                ],
            ),
            itinerary(31, vec![leg("TRAM", Some("2"), "Victoria", "Raml", 31)]),
        ]
    }

    #[test]
    fn test_english_plan() {
        let text = trip_plan(
            &sample(),
            &place("Victoria Station", 31.2488, 29.9806),
            &place("Raml Station", 31.2003, 29.8991),
            Language::English,
        );
        assert!(text.starts_with("🚌 **Trip Plan from Victoria Station to Raml Station**"));
        assert!(text.contains("**Total Time:** 25 minutes"));
        assert!(text.contains("**Total Distance:** 6.4 km"));
        assert!(text.contains("1. 🚶 Walk from **Origin** to **Victoria Station** (4 min - 1.2 km)"));
        assert!(text.contains("2. 🚌 Take BUS 12 from **Victoria Station** to **Raml Station** (21 min)"));
        assert!(text.contains("**Transit Modes Used:** BUS"));
        assert!(text.contains("- 31 min: Take TRAM 2 from Victoria to Raml"));
    }

    #[test]
    fn test_arabic_plan_uses_arabic_modes() {
        let text = trip_plan(
            &sample(),
            &place("Victoria Station", 31.2488, 29.9806),
            &place("Raml Station", 31.2003, 29.8991),
            Language::Arabic,
        );
        assert!(text.contains("**الوقت الكلي:** 25 دقيقة"));
        assert!(text.contains("اركب أتوبيس 12"));
        assert!(text.contains("**وسائل النقل المستخدمة:** أتوبيس"));
        assert!(text.contains("- 31 دقيقة، 0 تحويلة: ترام"));
        assert!(!text.contains("BUS"));
    }

    #[test]
    fn test_fallback_coordinates() {
        let text = fallback(
            &place("Falaki - Al Seyouf", 31.241222, 29.998835),
            &place("Sidi Gaber Station", 31.218117, 29.941997),
            Language::English,
        );
        assert!(text.contains("**From:** Falaki - Al Seyouf (31.2412, 29.9988)"));
        assert!(text.contains("**To:** Sidi Gaber Station (31.2181, 29.9420)"));

        let ar = fallback(
            &place("A", 1.0, 2.0),
            &place("B", 3.0, 4.0),
            Language::Arabic,
        );
        assert!(ar.contains("**من:** A (1.0000, 2.0000)"));
    }

    #[test]
    fn test_arabic_mode_names() {
        assert_eq!(arabic_mode_name("BUS"), "أتوبيس");
        assert_eq!(arabic_mode_name("FERRY"), "عبارة");
        assert_eq!(arabic_mode_name("CABLE_CAR"), "CABLE_CAR");
    }

    #[test]
    fn test_messages_follow_language() {
        assert!(clarification(Language::English).starts_with("Please specify"));
        assert!(clarification(Language::Arabic).starts_with("من فضلك"));
        assert!(not_found("Xyz", Language::Arabic).contains("**Xyz**"));
    }
}
