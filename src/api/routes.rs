use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::PlanGenerationService;

use super::health::health_check;
use super::plans::generate_plan;

pub fn create_routes(service: PlanGenerationService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/plans/generate", post(generate_plan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
