//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Stored preferences, favorites and search history.
pub mod memory;
/// Natural-language trip queries.
pub mod query;
/// Health, system status and recent places.
pub mod status;
/// Stop search and geocoding.
pub mod stops;
/// Tool listing and invocation.
pub mod tools;
