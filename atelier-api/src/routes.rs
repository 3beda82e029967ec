//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Builder directory
        .route("/api/v1/builders", get(handlers::list_builders))
        .route("/api/v1/builders", post(handlers::add_builder))
        .route("/api/v1/builders/key", put(handlers::set_builder_key))
        .route("/api/v1/builders/:address", get(handlers::get_builder))
        // Join-request queue
        .route("/api/v1/requests", get(handlers::list_requests))
        .route("/api/v1/requests", post(handlers::request_join))
        .route("/api/v1/requests/:address/accept", post(handlers::accept_request))
        .route("/api/v1/requests/:address/decline", post(handlers::decline_request))
        // Registry counters
        .route("/api/v1/registry/stats", get(handlers::get_stats))
        .with_state(state)
}
