//! # Alexandria Transit Assistant
//!
//! Answers public transport questions about Alexandria, Egypt, written in
//! English, Modern Standard Arabic or Egyptian Arabic.
//!
//! ## Overview
//!
//! A query goes through a fixed pipeline:
//!
//! 1. **Language detection** - share of Arabic letters
//! 2. **Location extraction** - regex patterns, then stop mentions, then
//!    (optionally) Gemini
//! 3. **Geocoding** - place names to stops from the built-in catalog or a
//!    GTFS `stops.txt`
//! 4. **Trip planning** - OpenTripPlanner `/plan`, with a generic fallback
//!    reply when OTP is unavailable
//! 5. **Reply** - formatted in the language of the query
//!
//! The crate can be used in two ways:
//!
//! 1. **As an application** - run the `transit-agent` binary (`chat`,
//!    `serve`, `ask`, ...)
//! 2. **As a library** - embed [`TransitAgent`] or the API router
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use transit::{TransitAgent, TransitConfigManager};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(TransitConfigManager::new("transit.toml")?);
//!     let agent = TransitAgent::from_config(config)?;
//!
//!     let reply = agent.process_query("عايز أروح من الفلكي لسيدي جابر").await;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Interactive API documentation at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`agent`] - Query pipeline and reply formatting
//! - [`api`] - REST API handlers, routes and the embedded page
//! - [`cli`] - Command-line interface
//! - [`geocoding`] - Stop catalog and place-name resolution
//! - [`llm`] - Gemini client used for fallback extraction
//! - [`memory`] - Recent places, favorites, preferences and history
//! - [`nlu`] - Language detection, Arabic normalization, extraction
//! - [`otp`] - OpenTripPlanner client
//! - [`tools`] - Agent tools and registry
//! - [`types`] - Common types and error handling
//! - [`utils`] - TOML configuration with hot reload

#![warn(rustdoc::missing_crate_level_docs)]

/// Query pipeline and reply formatting.
pub mod agent;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Stop catalog and geocoding.
pub mod geocoding;
/// LLM provider clients and abstractions.
pub mod llm;
/// Persistent user memory.
pub mod memory;
/// Language detection and location extraction.
pub mod nlu;
/// OpenTripPlanner client.
pub mod otp;
/// Agent tools exposed over the API.
pub mod tools;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agent::{AgentReply, SystemStatus, TransitAgent};
pub use geocoding::Geocoder;
pub use llm::{LLMClient, LLMClientFactory, Provider};
pub use memory::MemoryStore;
pub use otp::OtpClient;
pub use tools::registry::ToolRegistry;
pub use types::{AppError, Result};
pub use utils::toml_config::{TransitConfig, TransitConfigManager};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Query pipeline, geocoder, memory and the hot-reloaded configuration
    pub agent: Arc<TransitAgent>,
    /// Tool registry for agent tools
    pub tool_registry: Arc<ToolRegistry>,
}

impl AppState {
    /// State around an existing agent, with the transit tools registered
    pub fn new(agent: Arc<TransitAgent>) -> Self {
        Self {
            tool_registry: Arc::new(ToolRegistry::with_transit_tools(agent.clone())),
            agent,
        }
    }
}
