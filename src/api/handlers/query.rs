//! Trip query handler

use crate::{
    AppState,
    types::{AppError, QueryRequest, QueryResponse, Result},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use uuid::Uuid;

/// Answer a transit question in English or Arabic
///
/// Always returns a reply when the query is non-empty: a trip plan, a
/// fallback route description, a clarification request, or a not-found
/// message (see `source`).
#[utoipa::path(
    post,
    path = "/api/query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Reply produced", body = QueryResponse),
        (status = 400, description = "No query provided or body is not JSON"),
        (status = 413, description = "Request body too large")
    ),
    tag = "query"
)]
pub async fn process_query(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>> {
    let Json(payload) = payload?;
    let query = payload.query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("No query provided".to_string()));
    }

    let request_id = Uuid::new_v4().to_string();
    tracing::info!(request_id = %request_id, "Query received");

    let reply = state.agent.process_query(query).await;
    Ok(Json(reply.into_query_response(query.to_string(), request_id)))
}
