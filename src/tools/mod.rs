//! Agent tools
//!
//! Transit operations exposed as JSON-in/JSON-out tools, listed by
//! `GET /api/tools` and invoked with `POST /api/tools/{name}`.
//!
//! # Tool Registry
//!
//! ```ignore
//! let registry = ToolRegistry::with_transit_tools(agent.clone());
//! let stop = registry.execute("geocode_location", json!({"name": "Raml"})).await?;
//! ```

/// Tool registry for managing available tools.
pub mod registry;
/// Geocoding, stop search and trip planning tools.
pub mod transit;

pub use registry::{Tool, ToolRegistry};
