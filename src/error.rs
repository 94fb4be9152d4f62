use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::datastore::DatastoreError;
use crate::llm::LlmError;
use crate::models::Phase;

/// Everything that can abort a generation run. All variants are fatal for
/// the run: the driver stops at the failing node and nothing is persisted
/// (persistence is the terminal node only).
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("user {uid} not found")]
    MissingUser { uid: String },

    #[error("datastore unreachable: {0}")]
    StoreUnreachable(#[from] DatastoreError),

    #[error("{node}: {message}")]
    Validation {
        node: &'static str,
        message: String,
    },

    #[error("{node}: LLM call failed: {source}")]
    Llm {
        node: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("weekly plan invalid: {0}")]
    PlanInvalid(String),

    #[error("no valid target tags for day {day_index}")]
    NoValidTags { day_index: u8 },

    #[error("{phase} selection matched no pool variations")]
    EmptySelection { phase: Phase },

    #[error("session archive write failed: {0}")]
    ArchiveWrite(#[source] DatastoreError),

    #[error("blacklist rotation failed: {0}")]
    BlacklistRotate(#[source] DatastoreError),

    #[error("graph exceeded {limit} transitions")]
    TransitionLimit { limit: usize },

    #[error("generation budget of {0:?} exhausted")]
    BudgetExhausted(Duration),
}

impl GenerationError {
    /// Short machine-readable code, surfaced in the HTTP error body.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::MissingUser { .. } => "missing_user",
            GenerationError::StoreUnreachable(_) => "store_unreachable",
            GenerationError::Validation { .. } => "validation",
            GenerationError::Llm { .. } => "llm_failed",
            GenerationError::PlanInvalid(_) => "plan_invalid",
            GenerationError::NoValidTags { .. } => "no_valid_tags",
            GenerationError::EmptySelection { .. } => "empty_selection",
            GenerationError::ArchiveWrite(_) => "archive_write_failed",
            GenerationError::BlacklistRotate(_) => "blacklist_rotate_failed",
            GenerationError::TransitionLimit { .. } => "transition_limit",
            GenerationError::BudgetExhausted(_) => "budget_exhausted",
        }
    }
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
