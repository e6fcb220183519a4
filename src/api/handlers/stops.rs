//! Stop search and geocoding

use crate::{
    AppState,
    geocoding::{GeocodeMatch, TransitStop},
    types::{AppError, Result},
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

const DEFAULT_STOPS_LIMIT: usize = 20;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StopsQuery {
    /// Text to search for; all stops when omitted
    pub q: Option<String>,
    /// Maximum number of stops (default 20)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GeocodeQuery {
    /// Place name in English or Arabic
    pub q: String,
}

/// Search the stop catalog
#[utoipa::path(
    get,
    path = "/api/stops",
    params(StopsQuery),
    responses((status = 200, description = "Matching stops", body = Vec<TransitStop>)),
    tag = "stops"
)]
pub async fn search_stops(
    State(state): State<AppState>,
    Query(params): Query<StopsQuery>,
) -> Json<Vec<TransitStop>> {
    let limit = params.limit.unwrap_or(DEFAULT_STOPS_LIMIT);
    let geocoder = state.agent.geocoder();

    let stops = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => geocoder
            .search_stops(q, limit)
            .into_iter()
            .cloned()
            .collect(),
        _ => geocoder.all_stops().iter().take(limit).cloned().collect(),
    };

    Json(stops)
}

/// Resolve a place name to a stop
#[utoipa::path(
    get,
    path = "/api/geocode",
    params(GeocodeQuery),
    responses(
        (status = 200, description = "Place resolved", body = GeocodeMatch),
        (status = 400, description = "Empty name"),
        (status = 404, description = "Place not found")
    ),
    tag = "stops"
)]
pub async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeQuery>,
) -> Result<Json<GeocodeMatch>> {
    let name = params.q.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("No location provided".to_string()));
    }

    state
        .agent
        .geocoder()
        .geocode(name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Location not found: {}", name)))
}
