pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/keywords",
            post(handlers::handle_keyword_preview),
        )
        .route(
            "/api/v1/resumes/generate",
            post(handlers::handle_generate),
        )
        .with_state(state)
}
