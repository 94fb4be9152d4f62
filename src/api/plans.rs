use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GenerationError;
use crate::models::TrainingSession;
use crate::services::{PlanGenerationService, RequestType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub user_id: String,
    #[serde(default = "default_request_type")]
    pub request_type: RequestType,
}

fn default_request_type() -> RequestType {
    RequestType::Weekly
}

#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    pub sessions: Vec<TrainingSession>,
}

/// Generate and persist one week of training sessions. Fatal generation
/// errors map to 500 with `{error, message}`.
pub async fn generate_plan(
    State(service): State<PlanGenerationService>,
    Json(request): Json<GeneratePlanRequest>,
) -> Result<Json<GeneratePlanResponse>, GenerationError> {
    info!(user_id = %request.user_id, "plan generation requested");
    let sessions = service
        .execute(&request.user_id, request.request_type)
        .await?;
    Ok(Json(GeneratePlanResponse { sessions }))
}
