use crate::{handlers, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Configuration documents are small JSON files; anything larger is rejected
/// before it is forwarded to the model service.
const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Browser workflow
        .route("/", get(handlers::index).post(handlers::upload_config))
        // JSON API
        .route("/api/analyze", post(handlers::analyze))
        // Health check
        .route("/health", get(handlers::health))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}
