pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume", get(handlers::handle_list))
        .route("/resume/extract", post(handlers::handle_extract))
        .route(
            "/resume/upload-and-process",
            post(handlers::handle_upload_and_process),
        )
        .route("/resume/upload", post(handlers::handle_upload))
        .route(
            "/resume/career/recommendations",
            post(handlers::handle_recommendations),
        )
        .route(
            "/resume/resumes-comparison",
            post(handlers::handle_comparison),
        )
        .route(
            "/resume/:id",
            get(handlers::handle_get).delete(handlers::handle_delete),
        )
        .route("/resume/:id/analysis", get(handlers::handle_analysis))
        .route("/resume/:id/file", get(handlers::handle_download))
        .layer(body_limit)
        .with_state(state)
}
