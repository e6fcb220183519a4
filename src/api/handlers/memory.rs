//! Preferences, favorites and search history

use crate::{
    AppState,
    memory::{FavoriteLocation, PreferencesUpdate, SearchEntry, UserPreferences},
    types::{AppError, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteResponse {
    /// `false` when a favorite already exists at these coordinates
    pub added: bool,
    pub favorites: Vec<FavoriteLocation>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Number of most recent searches (default 10)
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/preferences",
    responses((status = 200, description = "Current preferences", body = UserPreferences)),
    tag = "memory"
)]
pub async fn get_preferences(State(state): State<AppState>) -> Json<UserPreferences> {
    Json(state.agent.memory().preferences())
}

/// Update some preference fields
#[utoipa::path(
    put,
    path = "/api/preferences",
    request_body = PreferencesUpdate,
    responses(
        (status = 200, description = "Preferences updated", body = UserPreferences),
        (status = 400, description = "Invalid value")
    ),
    tag = "memory"
)]
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<UserPreferences>> {
    if update.is_empty() {
        return Err(AppError::InvalidInput("No preference fields provided".to_string()));
    }
    Ok(Json(state.agent.memory().update_preferences(update)?))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    responses((status = 200, description = "Saved favorites", body = Vec<FavoriteLocation>)),
    tag = "memory"
)]
pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteLocation>> {
    Json(state.agent.memory().favorites())
}

/// Save a favorite place
///
/// Coordinates within 0.001° of an existing favorite are not added twice.
#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Favorite added", body = FavoriteResponse),
        (status = 200, description = "Already saved", body = FavoriteResponse),
        (status = 400, description = "Invalid favorite")
    ),
    tag = "memory"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>)> {
    if !(-90.0..=90.0).contains(&payload.lat) || !(-180.0..=180.0).contains(&payload.lon) {
        return Err(AppError::InvalidInput("Coordinates out of range".to_string()));
    }

    let memory = state.agent.memory();
    let added = memory.add_favorite(&payload.name, payload.lat, payload.lon)?;
    let status = if added { StatusCode::CREATED } else { StatusCode::OK };

    Ok((
        status,
        Json(FavoriteResponse {
            added,
            favorites: memory.favorites(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{name}",
    params(("name" = String, Path, description = "Favorite name (case-insensitive)")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 404, description = "No favorite with that name")
    ),
    tag = "memory"
)]
pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode> {
    if state.agent.memory().remove_favorite(&name)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Favorite not found: {}", name)))
    }
}

/// Most recent searches, oldest first
#[utoipa::path(
    get,
    path = "/api/history",
    params(HistoryQuery),
    responses((status = 200, description = "Search history", body = Vec<SearchEntry>)),
    tag = "memory"
)]
pub async fn search_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Json<Vec<SearchEntry>> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Json(state.agent.memory().search_history(limit))
}
