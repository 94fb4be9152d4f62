//! Node 5.1: choose the target tags for the current session.

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::GenerationError;
use crate::graph::state::{GraphState, SessionContext, StateUpdate};
use crate::llm::{prompts, schemas, LlmClient, LlmError};
use crate::models::tags;

const NODE: &str = "phase_orchestrator";
const MAX_TAGS: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetTagsArgs {
    target_tags: Vec<String>,
}

/// Writes `current_session_context` for the scheduled day at
/// `current_day_index` and resets the per-phase selections. Tags outside the
/// closed set are discarded; an entirely invalid answer is fatal.
pub async fn run(llm: &dyn LlmClient, state: &GraphState) -> Result<StateUpdate, GenerationError> {
    let plan = state
        .weekly_plan
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "weekly plan missing".to_string(),
        })?;
    let profile = state
        .user_profile
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "cleaned profile missing".to_string(),
        })?;
    let day = plan
        .schedule
        .get(state.current_day_index)
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: format!("no scheduled day at index {}", state.current_day_index),
        })?;

    let tool = schemas::select_target_tags();
    let args = llm
        .invoke(&prompts::target_tags_prompt(day, profile), &tool)
        .await
        .map_err(|source| GenerationError::Llm { node: NODE, source })?;

    let parsed: TargetTagsArgs =
        serde_json::from_value(args).map_err(|e| GenerationError::Llm {
            node: NODE,
            source: LlmError::Parse(e.to_string()),
        })?;

    let mut valid = tags::sanitize(&parsed.target_tags);
    if valid.is_empty() {
        return Err(GenerationError::NoValidTags {
            day_index: day.day_index,
        });
    }
    if valid.len() < parsed.target_tags.len() {
        warn!(
            day_index = day.day_index,
            requested = parsed.target_tags.len(),
            kept = valid.len(),
            "discarded tags outside the closed set"
        );
    }
    valid.truncate(MAX_TAGS);

    info!(day_index = day.day_index, tags = ?valid, "session context ready");

    Ok(StateUpdate {
        current_session_context: Some(Some(SessionContext {
            focus: day.focus.clone(),
            description: day.description.clone(),
            system_goal: day.system_goal.clone(),
            target_tags: valid,
        })),
        selected_warmup: Some(vec![]),
        selected_workout: Some(vec![]),
        selected_cooldown: Some(vec![]),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    use crate::llm::ToolSchema;
    use crate::models::{ScheduledTrainingDay, UserProfile, WeeklyPlan};

    use super::*;

    struct FixedLlm(Value);

    #[async_trait]
    impl LlmClient for FixedLlm {
        async fn invoke(&self, _prompt: &str, _tool: &ToolSchema) -> Result<Value, LlmError> {
            Ok(self.0.clone())
        }
    }

    fn ready_state() -> GraphState {
        let mut state = GraphState::new("u1");
        state.user_profile = Some(UserProfile {
            uid: "u1".to_string(),
            metrics: Default::default(),
            discomforts: vec![],
            objectives: vec![],
            preferred_disciplines: vec![],
        });
        state.weekly_plan = Some(WeeklyPlan {
            total_training_days: 1,
            training_days: vec![2],
            start_date: NaiveDate::from_ymd_opt(2025, 1, 21).unwrap(),
            goal_description: "goal".to_string(),
            schedule: vec![ScheduledTrainingDay {
                day_index: 2,
                focus: "Push strength".to_string(),
                description: "Upper body push".to_string(),
                system_goal: "Develop pressing power".to_string(),
            }],
        });
        state
    }

    #[tokio::test]
    async fn filters_invalid_tags_case_insensitively() {
        let llm = FixedLlm(json!({ "targetTags": ["Chest", "PUSH", "zumba", "core"] }));
        let update = run(&llm, &ready_state()).await.unwrap();

        let ctx = update.current_session_context.unwrap().unwrap();
        assert_eq!(ctx.target_tags, vec!["chest", "push", "core"]);
        assert_eq!(ctx.focus, "Push strength");
        // selections are reset for the new session
        assert_eq!(update.selected_warmup, Some(vec![]));
        assert_eq!(update.selected_workout, Some(vec![]));
        assert_eq!(update.selected_cooldown, Some(vec![]));
    }

    #[tokio::test]
    async fn all_tags_invalid_is_fatal() {
        let llm = FixedLlm(json!({ "targetTags": ["zumba", "spinning"] }));
        let err = run(&llm, &ready_state()).await.unwrap_err();
        assert_matches!(err, GenerationError::NoValidTags { day_index: 2 });
    }

    #[tokio::test]
    async fn malformed_arguments_are_an_llm_error() {
        let llm = FixedLlm(json!({ "tags": ["chest"] }));
        let err = run(&llm, &ready_state()).await.unwrap_err();
        assert_matches!(err, GenerationError::Llm { .. });
    }
}
