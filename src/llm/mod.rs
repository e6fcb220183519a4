//! LLM Provider Clients and Abstractions
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that providers implement
//! - [`Provider`] - Runtime provider description built from `[llm]`
//! - [`LLMClientFactory`] - Creates clients from the configured provider
//!
//! # Example
//!
//! ```ignore
//! use transit::llm::LLMClientFactory;
//!
//! let factory = LLMClientFactory::from_config(&config.llm);
//! if let Some(client) = factory.create_default()? {
//!     let reply = client.generate("Where is Raml Station?").await?;
//! }
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// Google Gemini REST client.
pub mod gemini;

pub use client::{LLMClient, LLMClientFactory, Provider};
pub use gemini::GeminiClient;
