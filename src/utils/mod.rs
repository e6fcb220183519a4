//! Configuration utilities

/// `transit.toml` loading, validation and hot reload.
pub mod toml_config;
