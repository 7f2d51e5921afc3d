pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis lifecycle
        .route(
            "/api/v1/analyses",
            post(handlers::handle_create_analysis).get(handlers::handle_list_analyses),
        )
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        // One-shot analyzer calls (no persistence)
        .route("/api/v1/analyses/profile", post(handlers::handle_profile))
        .route("/api/v1/analyses/technical", post(handlers::handle_technical))
        .route("/api/v1/analyses/aha", post(handlers::handle_aha))
        // Roadmap generation
        .route("/api/v1/roadmap", post(handlers::handle_roadmap))
        // Interview coaching
        .route("/api/v1/coach/chat", post(handlers::handle_chat))
        .route("/api/v1/coach/voice", post(handlers::handle_voice))
        .route(
            "/api/v1/coach/pronunciation",
            post(handlers::handle_pronunciation),
        )
        .with_state(state)
}
