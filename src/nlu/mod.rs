//! Language understanding for transit queries
//!
//! Queries arrive in English, Modern Standard Arabic or Egyptian Arabic.
//! This module detects the language and pulls the origin and destination
//! out of the text:
//!
//! 1. [`extract::extract_with_patterns`]: phrase patterns ("from X to Y",
//!    "من X إلى Y", "من X لY")
//! 2. [`extract::extract_from_mentions`]: known stop names appearing in the text
//! 3. [`llm_extract::LlmLocationExtractor`]: an LLM asked for a JSON answer

pub mod extract;
pub mod llm_extract;
pub mod normalize;

use serde::{Deserialize, Serialize};

use crate::types::Language;

pub use extract::{extract_from_mentions, extract_locations, extract_with_patterns};
pub use llm_extract::LlmLocationExtractor;
pub use normalize::{normalize_arabic, normalize_egyptian};

/// Share of Arabic letters above which a query counts as Arabic
const ARABIC_RATIO_THRESHOLD: f64 = 0.3;

/// Which strategy produced a location pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Pattern,
    Mentions,
    Llm,
}

/// Origin and destination extracted from a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPair {
    pub from: String,
    pub to: String,
    /// Other readings of the destination, tried in order when `to` does not
    /// geocode (e.g. the raw text of a glued `ل` prefix)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_alternates: Vec<String>,
    pub method: ExtractionMethod,
}

impl LocationPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>, method: ExtractionMethod) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            to_alternates: Vec::new(),
            method,
        }
    }

    /// Destination readings in preference order
    pub fn to_candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.to.as_str()).chain(self.to_alternates.iter().map(String::as_str))
    }
}

/// Whether a character is in the Arabic block (U+0600..=U+06FF)
pub fn is_arabic_char(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Detect the language of a query.
///
/// Counts alphabetic characters; if more than 30% of them are Arabic the
/// query is Arabic. Text without letters (numbers, emoji) gets `fallback`.
pub fn detect_language(text: &str, fallback: Language) -> Language {
    let mut letters = 0usize;
    let mut arabic = 0usize;

    for c in text.chars().filter(|c| c.is_alphabetic()) {
        letters += 1;
        if is_arabic_char(c) {
            arabic += 1;
        }
    }

    if letters == 0 {
        return fallback;
    }

    if arabic as f64 / letters as f64 > ARABIC_RATIO_THRESHOLD {
        Language::Arabic
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_arabic() {
        assert_eq!(
            detect_language("عايز أروح من الفلكي لسيدي جابر", Language::English),
            Language::Arabic
        );
    }

    #[test]
    fn test_detect_english() {
        assert_eq!(
            detect_language("How do I go from Falaki to Montazah?", Language::Arabic),
            Language::English
        );
    }

    #[test]
    fn test_detect_mixed_over_threshold() {
        // 4 Arabic letters out of 13 is above 30%
        assert_eq!(detect_language("from سموح abcde", Language::English), Language::Arabic);
        // 1 Arabic letter out of 13 is not
        assert_eq!(
            detect_language("from Victoria ل", Language::Arabic),
            Language::English
        );
    }

    #[test]
    fn test_detect_no_letters_uses_fallback() {
        assert_eq!(detect_language("123 ?!", Language::Arabic), Language::Arabic);
        assert_eq!(detect_language("", Language::English), Language::English);
    }

    #[test]
    fn test_to_candidates() {
        let mut pair = LocationPair::new("a", "b", ExtractionMethod::Pattern);
        pair.to_alternates.push("c".to_string());
        assert_eq!(pair.to_candidates().collect::<Vec<_>>(), vec!["b", "c"]);
    }
}
