//! Alias generation for stop names.

use crate::nlu::normalize::{match_key, EDGE_PUNCTUATION};

/// Arabic (and Arabizi) renderings of generic words found in stop names
pub const GENERIC_TRANSLATIONS: &[(&str, &[&str])] = &[
    ("Station", &["محطة", "استيشن"]),
    ("Hospital", &["مستشفى", "هوسبيتال"]),
    ("School", &["مدرسة", "سكوله"]),
    ("Club", &["نادي", "كلوب"]),
    ("Bridge", &["كوبري", "جسر"]),
    ("Square", &["ميدان", "سكوير"]),
    ("Mosque", &["مسجد", "جامع"]),
    ("Police", &["شرطة", "بوليس"]),
    ("University", &["جامعة", "يونيفرسيتي"]),
    ("Post Office", &["مكتب بريد", "بوسطة"]),
    ("Gas Station", &["محطة بنزين", "بنزينة"]),
    ("Tunnel", &["نفق", "تونيل"]),
    ("Market", &["سوق", "ماركت"]),
    ("Mall", &["مول", "سنتر"]),
    ("Factory", &["مصنع", "فابريكا"]),
    ("Gate", &["بوابة", "جيت"]),
    ("Cafe", &["كافيه", "قهوة"]),
    ("Restaurant", &["مطعم", "ريستوران"]),
];

/// Arabic names for Alexandria districts
pub const DISTRICT_ALIASES: &[(&str, &[&str])] = &[
    ("Victoria", &["فيكتوريا", "فيكتوري"]),
    ("Montazah", &["المنتزه", "منتزه", "منتزة"]),
    ("Sidi Gaber", &["سيدي جابر", "سيدى جابر"]),
    ("Raml", &["الرمل", "رمل"]),
    ("Mansheya", &["المنشية", "منشية"]),
    ("Sidi Bishr", &["سيدي بشر", "سيدى بشر"]),
    ("Gleem", &["جليم"]),
    ("Sporting", &["السبورتنج", "سبورتنج"]),
    ("Smouha", &["سموحة"]),
    ("Karmouz", &["كرموز"]),
    ("Abu Qir", &["أبو قير", "ابو قير"]),
    ("Agamy", &["العجمي"]),
    ("Stanley", &["ستانلي"]),
    ("San Stefano", &["سان ستيفانو"]),
    ("Miami", &["ميامي"]),
    ("Bahary", &["البحري"]),
    ("Asafra", &["العصفرة"]),
    ("Mandara", &["المندرة"]),
    ("Amreya", &["العامرية"]),
    ("Falaki", &["الفلكي", "فلكي"]),
    ("Seyouf", &["السيوف"]),
    ("Khorshid", &["خورشيد"]),
];

/// Arabic district spellings looked for inside a query that matched no alias
pub const DISTRICT_PATTERNS: &[(&str, &str)] = &[
    ("الفلكي", "Falaki"),
    ("فلكي", "Falaki"),
    ("السيوف", "Seyouf"),
    ("سيوف", "Seyouf"),
    ("سيدي جابر", "Sidi Gaber"),
    ("سيدى جابر", "Sidi Gaber"),
    ("سيدي بشر", "Sidi Bishr"),
    ("فيكتوريا", "Victoria"),
    ("المنتزه", "Montazah"),
    ("منتزه", "Montazah"),
    ("الرمل", "Raml"),
    ("رمل", "Raml"),
    ("المنشية", "Mansheya"),
    ("العجمي", "Agamy"),
    ("سموحة", "Smouha"),
];

/// Words too common in stop names to identify a stop by containment.
const FILLER_WORDS: &[&str] = &[
    "al", "el", "the", "of", "and", "st", "st.", "street", "road", "rd", "new", "old", "city",
    "station", "square", "terminal", "stop", "bus", "tram", "train", "school", "hospital",
    "club", "bridge", "mosque", "church", "police", "university", "market", "mall", "gate",
    "cafe", "restaurant", "factory", "tunnel", "office", "post", "gas", "entrance", "north",
    "south", "east", "west", "محطه", "ميدان", "مدرسه", "مستشفي", "نادي", "كوبري", "مسجد",
    "جامع", "شرطه", "جامعه", "سوق", "مول", "بوابه", "مطعم", "شارع",
];

/// Whether a normalized alias is a generic word that must not be matched
/// by containment.
pub fn is_filler(key: &str) -> bool {
    FILLER_WORDS.contains(&key)
}

/// Build the alias list for a stop name.
///
/// The full name and its lowercase form come first, then per-word aliases,
/// Arabic translations of generic words and Arabic district names.
/// Duplicates (by match key) and empty strings are removed; order is stable.
pub fn generate_aliases(stop_name: &str) -> Vec<String> {
    let mut aliases = vec![stop_name.to_string(), stop_name.to_lowercase()];
    let lower_name = stop_name.to_lowercase();

    for part in stop_name.split_whitespace() {
        let word = part
            .trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c) || matches!(c, '(' | ')' | '-'));
        if word.is_empty() {
            continue;
        }
        aliases.push(word.to_lowercase());
    }

    for (english, arabic) in GENERIC_TRANSLATIONS {
        if contains_word_phrase(&lower_name, &english.to_lowercase()) {
            aliases.extend(arabic.iter().map(|a| a.to_string()));
        }
    }

    for (district, arabic) in DISTRICT_ALIASES {
        let district_lower = district.to_lowercase();
        if contains_word_phrase(&lower_name, &district_lower) {
            if district_lower.contains(' ') {
                aliases.push(district_lower);
            }
            aliases.extend(arabic.iter().map(|a| a.to_string()));
        }
    }

    let mut seen = std::collections::HashSet::new();
    aliases
        .into_iter()
        .filter(|a| !a.trim().is_empty())
        .filter(|a| seen.insert(match_key(a)))
        .collect()
}

/// Whether `phrase` occurs in `haystack` starting at a word boundary.
///
/// Word-start matching lets "Station" match "Stations" while keeping
/// "Mall" out of "Small".
fn contains_word_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}
