//! Mock implementations for testing.
//!
//! This module provides a mock LLM client that can be used across different
//! test files without duplication.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use transit::llm::LLMClient;
use transit::types::{AppError, Result};

/// Mock LLM client for testing with a fixed response.
///
/// Counts calls so tests can assert whether the LLM fallback ran.
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of generate calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn reply(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.reply()
    }

    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        self.reply()
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
