use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::otp::Itinerary;

// ============= Language =============

/// Language of a query and of the reply produced for it.
///
/// Egyptian Arabic is folded into [`Language::Arabic`]; the dialect is only
/// normalized for matching, replies are always written in Modern Standard
/// Arabic with Egyptian transport vocabulary.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[serde(rename = "ar")]
    Arabic,
    #[default]
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Two-letter code (`ar` / `en`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
        }
    }

    /// Parse a two-letter code, defaulting to English for anything unknown
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "ar" | "arabic" | "eg" | "arz" => Language::Arabic,
            _ => Language::English,
        }
    }

    pub fn is_arabic(&self) -> bool {
        matches!(self, Language::Arabic)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

/// How a reply was produced
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// Trip planned by OpenTripPlanner
    Otp,
    /// Both places resolved but OTP could not plan; generic advice returned
    Fallback,
    /// Origin and destination could not be extracted from the query
    Clarification,
    /// A place was extracted but could not be geocoded
    NotFound,
}

/// A place name from the query resolved to a stop
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ResolvedPlace {
    /// Text as it appeared in the query
    pub query: String,
    /// Canonical stop name
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub stop_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub success: bool,
    pub query: String,
    pub response: String,
    pub language: Language,
    pub source: ReplySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ResolvedPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<ResolvedPlace>,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    pub request_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub otp_status: bool,
    pub otp_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_detail: Option<String>,
    pub geocoder_stops: usize,
    pub memory_loaded: bool,
    pub llm_configured: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentResponse {
    pub recent: Vec<String>,
}

// ============= Tool Types =============

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub parameters: serde_json::Value,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Trip planner error: {0}")]
    Planner(String),

    #[error("Memory error: {0}")]
    Memory(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::utils::toml_config::ConfigError> for AppError {
    fn from(e: crate::utils::toml_config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<crate::otp::OtpError> for AppError {
    fn from(e: crate::otp::OtpError) -> Self {
        AppError::Planner(e.to_string())
    }
}

impl From<crate::memory::MemoryError> for AppError {
    fn from(e: crate::memory::MemoryError) -> Self {
        match e {
            crate::memory::MemoryError::Invalid(msg) => AppError::InvalidInput(msg),
            other => AppError::Memory(other.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        if rejection.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::InvalidInput(rejection.body_text())
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Config(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::LLM(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Planner(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Memory(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge(msg) => (axum::http::StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "success": false,
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Arabic.code(), "ar");
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::from_code("AR"), Language::Arabic);
        assert_eq!(Language::from_code("fr"), Language::English);
    }

    #[test]
    fn test_language_serde() {
        let json = serde_json::to_string(&Language::Arabic).unwrap();
        assert_eq!(json, "\"ar\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::English);
    }

    #[test]
    fn test_reply_source_serde() {
        let json = serde_json::to_string(&ReplySource::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
    }
}
