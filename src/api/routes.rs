use crate::AppState;
use crate::api::{ApiDoc, frontend::INDEX_HTML, handlers};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    response::Html,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Request bodies are small JSON documents
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Routes mounted under `/api`
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/query", post(handlers::query::process_query))
        .route("/status", get(handlers::status::system_status))
        .route("/recent", get(handlers::status::recent_locations))
        .route("/stops", get(handlers::stops::search_stops))
        .route("/geocode", get(handlers::stops::geocode))
        .route(
            "/preferences",
            get(handlers::memory::get_preferences).put(handlers::memory::update_preferences),
        )
        .route(
            "/favorites",
            get(handlers::memory::list_favorites).post(handlers::memory::add_favorite),
        )
        .route("/favorites/{name}", delete(handlers::memory::delete_favorite))
        .route("/history", get(handlers::memory::search_history))
        .route("/tools", get(handlers::tools::list_tools))
        .route("/tools/{name}", post(handlers::tools::execute_tool))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

/// Complete application: page, health probe, API and middleware
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(|| async { Html(INDEX_HTML) }))
        .route("/health", get(handlers::status::health))
        .nest("/api", create_router());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
