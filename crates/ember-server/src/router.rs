use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all drop endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/api/drops/text", post(handler::create_text))
        .route("/api/drops/file", post(handler::create_file))
        .route("/api/drops/:id", get(handler::inspect))
        .route("/api/drops/:id/retrieve", post(handler::retrieve))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes as usize))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
