//! Axum router — maps all URL paths to handlers.

use crate::handlers::{
    assess::assess_submit, chat::chat_submit, dump::dump_submit, health::health,
};
use crate::state::{AppState, SharedState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat_submit))
        .route("/api/dump", post(dump_submit))
        .route("/api/assess", post(assess_submit))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
