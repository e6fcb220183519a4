//! LLM fallback for origin/destination extraction.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{ExtractionMethod, LocationPair};
use crate::llm::LLMClient;
use crate::types::Result;

const EXTRACTION_PROMPT: &str = r#"You extract trip endpoints from transit questions about Alexandria, Egypt.
Questions may be in English, Modern Standard Arabic or Egyptian Arabic.

Reply with a single JSON object and nothing else:
{"from": "<origin place name>", "to": "<destination place name>"}

Keep place names as written in the question. Use null for a place that is not mentioned."#;

/// Asks an LLM for `{"from": ..., "to": ...}` when the rules find nothing.
pub struct LlmLocationExtractor {
    llm: Arc<dyn LLMClient>,
}

impl LlmLocationExtractor {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Returns `Ok(None)` when the model answers but does not name both places.
    pub async fn extract(&self, query: &str) -> Result<Option<LocationPair>> {
        let output = self
            .llm
            .generate_with_system(EXTRACTION_PROMPT, query)
            .await?;

        let pair = Self::parse_extraction(&output);
        if pair.is_none() {
            debug!("LLM extraction produced no usable pair: '{}'", output);
        }
        Ok(pair)
    }

    /// Parse the model output.
    ///
    /// This handles various LLM output formats:
    /// - Clean JSON: `{"from": "Raml", "to": "Gleem"}`
    /// - Markdown code fences around the JSON
    /// - Prose before or after the object
    /// - `null` or empty strings for missing places
    pub fn parse_extraction(output: &str) -> Option<LocationPair> {
        let trimmed = output.trim();
        let start = trimmed.find('{')?;
        let end = trimmed.rfind('}')?;
        if end < start {
            return None;
        }

        let value: Value = serde_json::from_str(&trimmed[start..=end]).ok()?;
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("null"))
                .map(str::to_string)
        };

        Some(LocationPair::new(field("from")?, field("to")?, ExtractionMethod::Llm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json() {
        let pair = LlmLocationExtractor::parse_extraction(r#"{"from": "Raml", "to": "Gleem"}"#)
            .unwrap();
        assert_eq!(pair.from, "Raml");
        assert_eq!(pair.to, "Gleem");
        assert_eq!(pair.method, ExtractionMethod::Llm);
    }

    #[test]
    fn test_parse_code_fence_and_prose() {
        let output = "Sure! Here you go:\n```json\n{\"from\": \"الفلكي\", \"to\": \"سيدي جابر\"}\n```\nHope that helps.";
        let pair = LlmLocationExtractor::parse_extraction(output).unwrap();
        assert_eq!(pair.from, "الفلكي");
        assert_eq!(pair.to, "سيدي جابر");
    }

    #[test]
    fn test_parse_missing_places() {
        assert!(LlmLocationExtractor::parse_extraction(r#"{"from": null, "to": "Gleem"}"#).is_none());
        assert!(LlmLocationExtractor::parse_extraction(r#"{"from": "  ", "to": "Gleem"}"#).is_none());
        assert!(LlmLocationExtractor::parse_extraction(r#"{"from": "Raml"}"#).is_none());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(LlmLocationExtractor::parse_extraction("I don't know").is_none());
        assert!(LlmLocationExtractor::parse_extraction("} {").is_none());
        assert!(LlmLocationExtractor::parse_extraction("{not json}").is_none());
    }
}
