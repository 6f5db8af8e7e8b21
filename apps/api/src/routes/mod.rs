pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{generation, jd, latex, render, validation};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job description analysis
        .route("/api/v1/keywords", post(jd::handlers::handle_keywords))
        .route("/api/v1/jd/analyze", post(jd::handlers::handle_analyze_jd))
        // Section engine
        .route(
            "/api/v1/sections/extract",
            post(latex::handlers::handle_extract_sections),
        )
        .route(
            "/api/v1/sections/apply",
            post(latex::handlers::handle_apply_sections),
        )
        .route(
            "/api/v1/sections/validate",
            post(validation::handlers::handle_validate_sections),
        )
        .route(
            "/api/v1/sections/generate",
            post(generation::handlers::handle_generate_section),
        )
        .route(
            "/api/v1/sections/refine",
            post(generation::handlers::handle_refine_section),
        )
        // Tailoring + rendering
        .route("/api/v1/tailor", post(generation::handlers::handle_tailor))
        .route("/api/v1/render", post(render::handlers::handle_render))
        .with_state(state)
}
