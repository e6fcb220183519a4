//! HTTP API Handlers and Routes
//!
//! Web interface for the transit assistant, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::frontend`](crate::api::frontend) - Embedded single-page UI
//!
//! # API Endpoints
//!
//! ## Page and health
//! - `GET /` - Query page
//! - `GET /health` - Liveness probe, returns `OK`
//!
//! ## Queries (`/api`)
//! - `POST /api/query` - Answer a transit question
//! - `GET /api/status` - OTP connectivity and component status
//! - `GET /api/recent` - Recently used places
//!
//! ## Stops
//! - `GET /api/stops?q=&limit=` - Search the stop catalog
//! - `GET /api/geocode?q=` - Resolve a place name
//!
//! ## Memory
//! - `GET /api/preferences`, `PUT /api/preferences`
//! - `GET /api/favorites`, `POST /api/favorites`, `DELETE /api/favorites/{name}`
//! - `GET /api/history?limit=`
//!
//! ## Tools
//! - `GET /api/tools` - Tool definitions
//! - `POST /api/tools/{name}` - Run a tool
//!
//! # OpenAPI Documentation
//!
//! The document is served at `/api/openapi.json`. When the `swagger-ui`
//! feature is enabled, interactive API documentation is available at
//! `/swagger-ui/`.

/// Embedded HTML page.
pub mod frontend;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

use crate::api::handlers::{memory, query, status, stops, tools};

/// OpenAPI description of the HTTP API
#[derive(OpenApi)]
#[openapi(
    info(title = "Alexandria Transit Assistant API"),
    paths(
        status::health,
        status::system_status,
        status::recent_locations,
        query::process_query,
        stops::search_stops,
        stops::geocode,
        memory::get_preferences,
        memory::update_preferences,
        memory::list_favorites,
        memory::add_favorite,
        memory::delete_favorite,
        memory::search_history,
        tools::list_tools,
        tools::execute_tool,
    ),
    components(schemas(
        crate::types::QueryRequest,
        crate::types::QueryResponse,
        crate::types::StatusResponse,
        crate::types::RecentResponse,
        crate::types::ToolDefinition,
        crate::geocoding::TransitStop,
        crate::geocoding::GeocodeMatch,
        crate::memory::UserPreferences,
        crate::memory::PreferencesUpdate,
        crate::memory::FavoriteLocation,
        crate::memory::SearchEntry,
        memory::FavoriteRequest,
        memory::FavoriteResponse,
    )),
    tags(
        (name = "query", description = "Trip questions"),
        (name = "status", description = "Health and status"),
        (name = "stops", description = "Stop catalog"),
        (name = "memory", description = "Preferences, favorites and history"),
        (name = "tools", description = "Agent tools")
    )
)]
pub struct ApiDoc;
