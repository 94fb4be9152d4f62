//! Node 3: ask the LLM for the weekly plan skeleton.

use chrono::NaiveDate;
use tracing::info;

use crate::dates;
use crate::error::GenerationError;
use crate::graph::state::{GraphState, StateUpdate};
use crate::llm::{prompts, schemas, LlmClient, LlmError};
use crate::models::WeeklyPlanDraft;

const NODE: &str = "strategy";

/// Produces the validated [`crate::models::WeeklyPlan`] and arms the loop
/// counter. Both an LLM failure and an invariant-breaking plan are fatal;
/// there is no retry.
pub async fn run(
    llm: &dyn LlmClient,
    state: &GraphState,
    today: NaiveDate,
) -> Result<StateUpdate, GenerationError> {
    let profile = state
        .user_profile
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "cleaned profile missing".to_string(),
        })?;

    let tool = schemas::generate_weekly_plan();
    let args = llm
        .invoke(&prompts::weekly_plan_prompt(profile), &tool)
        .await
        .map_err(|source| GenerationError::Llm { node: NODE, source })?;

    let draft: WeeklyPlanDraft = serde_json::from_value(args).map_err(|e| GenerationError::Llm {
        node: NODE,
        source: LlmError::Parse(e.to_string()),
    })?;
    draft.validate().map_err(GenerationError::PlanInvalid)?;

    let start_date = dates::compute_start_date(today, &draft.training_days);
    let plan = draft.into_plan(start_date);
    info!(
        uid = %state.uid,
        training_days = plan.total_training_days,
        start_date = %plan.start_date,
        "weekly plan skeleton ready"
    );

    Ok(StateUpdate {
        weekly_plan: Some(plan),
        current_day_index: Some(0),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::llm::ToolSchema;
    use crate::models::UserProfile;

    use super::*;

    struct FixedLlm(Value);

    #[async_trait]
    impl LlmClient for FixedLlm {
        async fn invoke(&self, _prompt: &str, _tool: &ToolSchema) -> Result<Value, LlmError> {
            Ok(self.0.clone())
        }
    }

    fn state_with_profile() -> GraphState {
        let mut state = GraphState::new("u1");
        state.user_profile = Some(UserProfile {
            uid: "u1".to_string(),
            metrics: Default::default(),
            discomforts: vec![],
            objectives: vec!["strength".to_string()],
            preferred_disciplines: vec!["Calisthenics".to_string()],
        });
        state
    }

    fn plan_args(days: &[u8]) -> Value {
        json!({
            "totalTrainingDays": days.len(),
            "trainingDays": days,
            "goalDescription": "A balanced week",
            "schedule": days.iter().map(|d| json!({
                "dayIndex": d,
                "focus": "Strength",
                "description": "Full body work",
                "systemGoal": "Build the base"
            })).collect::<Vec<_>>()
        })
    }

    #[tokio::test]
    async fn computes_start_date_and_resets_loop() {
        let llm = FixedLlm(plan_args(&[1, 3, 5]));
        let state = state_with_profile();
        // Wednesday 2025-01-22 is a training day
        let today = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();

        let update = run(&llm, &state, today).await.unwrap();
        let plan = update.weekly_plan.unwrap();
        assert_eq!(plan.start_date, today);
        assert_eq!(update.current_day_index, Some(0));
    }

    #[tokio::test]
    async fn invalid_plan_is_fatal() {
        let mut args = plan_args(&[1, 3, 5]);
        args["totalTrainingDays"] = json!(2);
        let llm = FixedLlm(args);
        let state = state_with_profile();
        let today = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();

        let err = run(&llm, &state, today).await.unwrap_err();
        assert_matches!(err, GenerationError::PlanInvalid(_));
    }

    #[tokio::test]
    async fn non_conforming_arguments_are_an_llm_error() {
        let llm = FixedLlm(json!({ "totally": "wrong" }));
        let state = state_with_profile();
        let today = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();

        let err = run(&llm, &state, today).await.unwrap_err();
        assert_matches!(err, GenerationError::Llm { node: "strategy", .. });
    }
}
