pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Frontend-facing API
        .route("/api/ping", get(health::ping_handler))
        .route("/api/process_job", post(handlers::handle_process_job))
        .with_state(state)
}
