//! Tool listing and invocation

use crate::{
    AppState,
    types::{Result, ToolDefinition},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/api/tools",
    responses((status = 200, description = "Registered tools", body = Vec<ToolDefinition>)),
    tag = "tools"
)]
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.tool_registry.get_tool_definitions())
}

/// Run a tool with JSON arguments
#[utoipa::path(
    post,
    path = "/api/tools/{name}",
    params(("name" = String, Path, description = "Tool name")),
    responses(
        (status = 200, description = "Tool result"),
        (status = 400, description = "Invalid arguments"),
        (status = 404, description = "Unknown tool"),
        (status = 502, description = "Trip planner unavailable")
    ),
    tag = "tools"
)]
pub async fn execute_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>> {
    let args = body
        .map(|Json(v)| v)
        .unwrap_or_else(|| Value::Object(Default::default()));
    tracing::debug!(tool = %name, "Executing tool");
    Ok(Json(state.tool_registry.execute(&name, args).await?))
}
