//! LLM client abstraction and provider selection
//!
//! The assistant only needs short completions (location extraction), so the
//! trait stays small. Gemini is the one hosted provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::types::Result;
use crate::utils::toml_config::LlmConfig;

/// Generic LLM client trait for provider abstraction
///
/// Implementations are expected to be cheap to share behind an `Arc`.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// Google Gemini (`generateContent` REST API)
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Gemini {
    ///     api_key: std::env::var("GEMINI_API_KEY")?,
    ///     base_url: "https://generativelanguage.googleapis.com".to_string(),
    ///     model: "gemini-1.5-flash".to_string(),
    ///     temperature: 0.1,
    ///     max_tokens: 256,
    ///     timeout: Duration::from_secs(15),
    /// };
    /// ```
    Gemini {
        api_key: String,
        base_url: String,
        model: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Duration,
    },
}

impl Provider {
    /// Provider described by `[llm]`, or `None` when the LLM is disabled or
    /// the API key variable is unset.
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let api_key = config.api_key()?;

        Some(Provider::Gemini {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Create a client instance for this provider
    pub fn create_client(&self) -> Result<Arc<dyn LLMClient>> {
        match self {
            Provider::Gemini {
                api_key,
                base_url,
                model,
                temperature,
                max_tokens,
                timeout,
            } => Ok(Arc::new(super::gemini::GeminiClient::new(
                api_key.clone(),
                base_url.clone(),
                model.clone(),
                *temperature,
                *max_tokens,
                *timeout,
            )?)),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini { .. } => "Gemini",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::Gemini { model, .. } => model,
        }
    }
}

/// Configuration-based client factory
///
/// Holds the provider resolved from configuration (if any) so callers can
/// create clients without re-reading the environment.
pub struct LLMClientFactory {
    default_provider: Option<Provider>,
}

impl LLMClientFactory {
    pub fn new(default_provider: Option<Provider>) -> Self {
        Self { default_provider }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(Provider::from_config(config))
    }

    /// Create a client using the default provider, `Ok(None)` when no
    /// provider is configured
    pub fn create_default(&self) -> Result<Option<Arc<dyn LLMClient>>> {
        self.default_provider
            .as_ref()
            .map(Provider::create_client)
            .transpose()
    }

    pub fn default_provider(&self) -> Option<&Provider> {
        self.default_provider.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.default_provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key_env(var: &str) -> LlmConfig {
        LlmConfig {
            api_key_env: var.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_yields_no_provider() {
        let mut config = config_with_key_env("PATH");
        config.enabled = false;
        assert!(Provider::from_config(&config).is_none());
    }

    #[test]
    fn test_missing_key_yields_no_provider() {
        let config = config_with_key_env("TRANSIT_LLM_TEST_UNSET_VARIABLE");
        assert!(Provider::from_config(&config).is_none());
        assert!(!LLMClientFactory::from_config(&config).is_configured());
    }

    #[test]
    fn test_provider_from_config() {
        // PATH is set in any test environment
        let config = config_with_key_env("PATH");
        let provider = Provider::from_config(&config).unwrap();
        assert_eq!(provider.name(), "Gemini");
        assert_eq!(provider.model(), "gemini-1.5-flash");
    }

    #[test]
    fn test_factory_creates_client() {
        let factory = LLMClientFactory::new(Some(Provider::Gemini {
            api_key: "test".to_string(),
            base_url: "http://localhost:1".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.1,
            max_tokens: 64,
            timeout: Duration::from_secs(1),
        }));

        let client = match factory.create_default() {
            Ok(Some(c)) => c,
            _ => panic!("expected a client"),
        };
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }
}
