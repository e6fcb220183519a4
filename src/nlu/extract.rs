//! Rule-based origin/destination extraction.

use regex::Regex;
use std::sync::LazyLock;

use super::normalize::normalize_egyptian;
use super::{ExtractionMethod, LocationPair};
use crate::geocoding::Geocoder;

/// Punctuation trimmed from both ends of a captured place name
const CAPTURE_TRIM: &[char] = &['?', '؟', '.', '!', '،', ',', '"', '\''];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    /// group 1 = from, group 2 = to
    FromTo,
    /// group 1 = to, group 2 = from ("to Y from X")
    ToFrom,
    /// group 1 = from, group 2 = `ل`/`لل` prefix, group 3 = rest of destination
    Glued,
}

struct QueryPattern {
    regex: Regex,
    shape: Shape,
}

const ARABIC_TO: &str = r"(?:إلى|الى|إلي|الي)";

static PATTERNS: LazyLock<Vec<QueryPattern>> = LazyLock::new(|| {
    let sources: Vec<(String, Shape)> = vec![
        // English
        (r"\bhow\s+(?:do|can)\s+i\s+(?:go|get)\s+from\s+(.+?)\s+to\s+(.+)".into(), Shape::FromTo),
        (r"\bi\s+want\s+to\s+go\s+from\s+(.+?)\s+to\s+(.+)".into(), Shape::FromTo),
        (r"\broute\s+from\s+(.+?)\s+to\s+(.+)".into(), Shape::FromTo),
        (r"\btravel\s+from\s+(.+?)\s+to\s+(.+)".into(), Shape::FromTo),
        (r"\bfrom\s+(.+?)\s+to\s+(.+)".into(), Shape::FromTo),
        (r"\b(?:get|go)\s+to\s+(.+?)\s+from\s+(.+)".into(), Shape::ToFrom),
        // Arabic
        (
            format!(r"أريد\s+(?:الذهاب|اذهب|أروح|اروح)\s+من\s+(.+?)\s+{ARABIC_TO}\s+(.+)"),
            Shape::FromTo,
        ),
        (
            format!(r"كيف\s+(?:أصل|اصل|أروح|اروح)\s+من\s+(.+?)\s+{ARABIC_TO}\s+(.+)"),
            Shape::FromTo,
        ),
        (format!(r"\bمن\s+(.+?)\s+{ARABIC_TO}\s+(.+)"), Shape::FromTo),
        (r"\bمن\s+(.+?)\s+لـ+\s*(.+)".into(), Shape::FromTo),
        (r"\bمن\s+(.+?)\s+ل\s+(.+)".into(), Shape::FromTo),
        // Egyptian: preposition glued to the destination ("من الفلكي لسيدي جابر")
        (r"\bمن\s+(.+?)\s+(لل|ل)(\S.*)".into(), Shape::Glued),
    ];

    sources
        .into_iter()
        .filter_map(|(src, shape)| {
            Regex::new(&format!("(?i){}", src))
                .map(|regex| QueryPattern { regex, shape })
                .map_err(|e| tracing::error!(pattern = %src, error = %e, "Invalid query pattern"))
                .ok()
        })
        .collect()
});

/// Courtesy phrases that are never part of a place name
const FILLER: &[&str] = &[
    "لو سمحتي",
    "لو سمحت",
    "من فضلك",
    "please",
    "thank you",
    "thanks",
    "شكرا",
];

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| c.is_whitespace() || CAPTURE_TRIM.contains(&c))
}

/// Drop courtesy phrases from both ends of the query
fn strip_filler(query: &str) -> &str {
    let mut s = query.trim_matches(|c: char| c.is_whitespace() || CAPTURE_TRIM.contains(&c));
    loop {
        let before = s.len();
        for filler in FILLER {
            let n = filler.len();
            if s.len() >= n
                && s.is_char_boundary(n)
                && s[..n].eq_ignore_ascii_case(filler)
                && is_boundary(s[n..].chars().next())
            {
                s = &s[n..];
            }
            let cut = s.len().saturating_sub(n);
            if s.len() >= n
                && s.is_char_boundary(cut)
                && s[cut..].eq_ignore_ascii_case(filler)
                && is_boundary(s[..cut].chars().next_back())
            {
                s = &s[..cut];
            }
            s = s.trim_matches(|c: char| c.is_whitespace() || CAPTURE_TRIM.contains(&c));
        }
        if s.len() == before {
            return s;
        }
    }
}

fn clean_capture(s: &str) -> String {
    s.trim().trim_matches(CAPTURE_TRIM).trim().to_string()
}

/// Extract origin and destination with phrase patterns.
///
/// The query is dialect-normalized first; patterns are tried in order and
/// the first one yielding two non-empty captures wins.
pub fn extract_with_patterns(query: &str) -> Option<LocationPair> {
    let normalized = normalize_egyptian(query);
    let stripped = strip_filler(&normalized);

    for pattern in PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(stripped) else {
            continue;
        };
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");

        let pair = match pattern.shape {
            Shape::FromTo => LocationPair::new(
                clean_capture(group(1)),
                clean_capture(group(2)),
                ExtractionMethod::Pattern,
            ),
            Shape::ToFrom => LocationPair::new(
                clean_capture(group(2)),
                clean_capture(group(1)),
                ExtractionMethod::Pattern,
            ),
            Shape::Glued => {
                let prefix = group(2);
                let rest = clean_capture(group(3));
                let to = if prefix == "لل" {
                    format!("ال{}", rest)
                } else {
                    rest.clone()
                };
                let mut pair =
                    LocationPair::new(clean_capture(group(1)), to, ExtractionMethod::Pattern);
                pair.to_alternates.push(format!("{}{}", prefix, rest));
                pair
            }
        };

        if pair.from.is_empty() || pair.to.is_empty() {
            continue;
        }
        return Some(pair);
    }

    None
}

/// Origin and destination from the first two distinct stops mentioned in
/// the query, in order of appearance.
pub fn extract_from_mentions(query: &str, geocoder: &Geocoder) -> Option<LocationPair> {
    let normalized = normalize_egyptian(query);
    let mut names: Vec<&str> = Vec::with_capacity(2);

    for mention in geocoder.mentions(&normalized) {
        let Some(stop) = geocoder.get(mention.stop_index) else {
            continue;
        };
        if !names.contains(&stop.name.as_str()) {
            names.push(&stop.name);
        }
        if names.len() == 2 {
            return Some(LocationPair::new(names[0], names[1], ExtractionMethod::Mentions));
        }
    }

    None
}

/// Patterns first, then stop mentions.
pub fn extract_locations(query: &str, geocoder: &Geocoder) -> Option<LocationPair> {
    extract_with_patterns(query).or_else(|| extract_from_mentions(query, geocoder))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(query: &str) -> (String, String) {
        let p = extract_with_patterns(query).expect("pattern should match");
        (p.from, p.to)
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(PATTERNS.len(), 12);
    }

    #[test]
    fn test_english_patterns() {
        assert_eq!(
            pair("How do I go from Falaki to Montazah?"),
            ("Falaki".to_string(), "Montazah".to_string())
        );
        assert_eq!(
            pair("I want to go from Victoria to Sidi Gaber"),
            ("Victoria".to_string(), "Sidi Gaber".to_string())
        );
        assert_eq!(
            pair("Route from Agamy to Sidi Bishr."),
            ("Agamy".to_string(), "Sidi Bishr".to_string())
        );
    }

    #[test]
    fn test_english_reversed() {
        assert_eq!(
            pair("how to get to Raml Station from Gleem"),
            ("Gleem".to_string(), "Raml Station".to_string())
        );
    }

    #[test]
    fn test_arabic_ila() {
        assert_eq!(
            pair("من فيكتوريا إلى المنتزه"),
            ("فيكتوريا".to_string(), "المنتزه".to_string())
        );
        assert_eq!(
            pair("كيف أصل من الرمل الى سموحة؟"),
            ("الرمل".to_string(), "سموحة".to_string())
        );
    }

    #[test]
    fn test_egyptian_glued_lam() {
        let p = extract_with_patterns("عايز أروح من الفلكي لسيدي جابر").unwrap();
        assert_eq!(p.from, "الفلكي");
        assert_eq!(p.to, "سيدي جابر");
        assert_eq!(p.to_alternates, vec!["لسيدي جابر".to_string()]);
    }

    #[test]
    fn test_glued_lam_with_courtesy_trailer() {
        let p = extract_with_patterns("من الفلكي لسيدي جابر لو سمحت").unwrap();
        assert_eq!(p.from, "الفلكي");
        assert_eq!(p.to, "سيدي جابر");

        assert_eq!(
            pair("من فضلك من الرمل لسموحة"),
            ("الرمل".to_string(), "سموحة".to_string())
        );
        assert_eq!(
            pair("from Victoria to Sidi Gaber, please!"),
            ("Victoria".to_string(), "Sidi Gaber".to_string())
        );
    }

    #[test]
    fn test_strip_filler() {
        assert_eq!(strip_filler("لو سمحت من الرمل لسموحة لو سمحت"), "من الرمل لسموحة");
        assert_eq!(strip_filler("Please, from A to B. Thanks"), "from A to B");
        // Only whole words are removed
        assert_eq!(strip_filler("from A to Bplease"), "from A to Bplease");
        assert_eq!(strip_filler("لو سمحت"), "");
    }

    #[test]
    fn test_egyptian_glued_lam_lam() {
        let p = extract_with_patterns("من المنشية للسيوف").unwrap();
        assert_eq!(p.from, "المنشية");
        assert_eq!(p.to, "السيوف");
        assert_eq!(p.to_alternates, vec!["للسيوف".to_string()]);
    }

    #[test]
    fn test_egyptian_dialect_place_normalized() {
        let p = extract_with_patterns("ازاي أروح من منشية لفيكتوريا").unwrap();
        assert_eq!(p.from, "المنشية");
        assert_eq!(p.to, "فيكتوريا");
    }

    #[test]
    fn test_tatweel_lam() {
        assert_eq!(
            pair("من الرمل لـ سموحة"),
            ("الرمل".to_string(), "سموحة".to_string())
        );
    }

    #[test]
    fn test_no_pattern() {
        assert!(extract_with_patterns("what time is it").is_none());
        assert!(extract_with_patterns("").is_none());
    }

    #[test]
    fn test_mentions_fallback() {
        let geocoder = Geocoder::builtin();
        let p = extract_locations("Smouha then Montazah", &geocoder).unwrap();
        assert_eq!(p.method, ExtractionMethod::Mentions);
        assert!(p.from.contains("Smouha"));
        assert!(p.to.contains("Montazah"));
    }

    #[test]
    fn test_mentions_needs_two_places() {
        let geocoder = Geocoder::builtin();
        assert!(extract_from_mentions("just Smouha", &geocoder).is_none());
    }
}
