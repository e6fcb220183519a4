//! Health, status and recent places

use crate::{
    AppState,
    types::{RecentResponse, StatusResponse},
};
use axum::{Json, extract::State};

/// Stops suggested when nothing has been searched yet
const RECENT_FALLBACK_COUNT: usize = 10;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is running", body = String)),
    tag = "status"
)]
pub async fn health() -> &'static str {
    "OK"
}

/// OTP connectivity and local component status
#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, description = "System status", body = StatusResponse)),
    tag = "status"
)]
pub async fn system_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.agent.check_system_status().await.into())
}

/// Recently used place names, or catalog stops when there are none
#[utoipa::path(
    get,
    path = "/api/recent",
    responses((status = 200, description = "Recent place names", body = RecentResponse)),
    tag = "status"
)]
pub async fn recent_locations(State(state): State<AppState>) -> Json<RecentResponse> {
    let mut recent: Vec<String> = state
        .agent
        .memory()
        .recent_locations(RECENT_FALLBACK_COUNT)
        .into_iter()
        .map(|r| r.name)
        .collect();

    if recent.is_empty() {
        recent = state
            .agent
            .geocoder()
            .all_stops()
            .iter()
            .take(RECENT_FALLBACK_COUNT)
            .map(|s| s.name.clone())
            .collect();
    }

    Json(RecentResponse { recent })
}
