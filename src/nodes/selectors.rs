//! Nodes 5.4.1-5.4.3: the three parallel phase selectors.
//!
//! Each selector reads the shared session context and its own slice of the
//! scored pool, and writes only its own selection channel; the state
//! reducers make the three-way fan-in race-free.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::GenerationError;
use crate::graph::state::{GraphState, StateUpdate};
use crate::llm::{prompts, schemas, LlmClient, LlmError};
use crate::models::{ExerciseVariation, Phase};

const NODE: &str = "phase_selector";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionArgs {
    variation_ids: Vec<String>,
}

/// Materialize the chosen ids back to full records by intersecting with the
/// pool. Duplicates and ids outside the pool are dropped; selection order is
/// preserved.
fn materialize(ids: &[String], pool: &[ExerciseVariation]) -> Vec<ExerciseVariation> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected = Vec::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        if let Some(found) = pool.iter().find(|v| v.id == *id) {
            selected.push(found.clone());
        }
    }
    selected
}

fn distinct_disciplines(variations: &[ExerciseVariation]) -> usize {
    variations
        .iter()
        .flat_map(|v| &v.disciplines)
        .map(|d| d.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

/// One selector call for `phase`.
pub async fn run(
    llm: &dyn LlmClient,
    state: &GraphState,
    phase: Phase,
) -> Result<StateUpdate, GenerationError> {
    let context = state
        .current_session_context
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "session context missing".to_string(),
        })?;
    let pool = state.scored_pool.phase(phase);

    let tool = schemas::select_phase_variations(phase);
    let args = llm
        .invoke(&prompts::phase_selection_prompt(phase, context, pool), &tool)
        .await
        .map_err(|source| GenerationError::Llm { node: NODE, source })?;

    let parsed: SelectionArgs = serde_json::from_value(args).map_err(|e| GenerationError::Llm {
        node: NODE,
        source: LlmError::Parse(e.to_string()),
    })?;

    let selected = materialize(&parsed.variation_ids, pool);
    if selected.is_empty() {
        return Err(GenerationError::EmptySelection { phase });
    }

    // Discipline diversity on the workout block is expected from the LLM;
    // a miss degrades the session but does not fail the run.
    if phase == Phase::Workout && distinct_disciplines(&selected) < 2 {
        warn!(
            day_index = state.current_day_index,
            "workout selection spans fewer than two disciplines"
        );
    }

    info!(
        phase = %phase,
        requested = parsed.variation_ids.len(),
        selected = selected.len(),
        "phase selection materialized"
    );

    Ok(StateUpdate::for_selection(phase, selected))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::graph::state::SessionContext;
    use crate::llm::ToolSchema;

    use super::*;

    struct FixedLlm(Value);

    #[async_trait]
    impl LlmClient for FixedLlm {
        async fn invoke(&self, _prompt: &str, _tool: &ToolSchema) -> Result<Value, LlmError> {
            Ok(self.0.clone())
        }
    }

    fn pooled(id: &str, phase: Phase, discipline: &str) -> ExerciseVariation {
        ExerciseVariation {
            id: id.to_string(),
            name: id.to_uppercase(),
            phase,
            disciplines: vec![discipline.to_string()],
            tags: vec![],
            score: Some(0.5),
        }
    }

    fn state_with_pool(phase: Phase, pool: Vec<ExerciseVariation>) -> GraphState {
        let mut state = GraphState::new("u1");
        state.current_session_context = Some(SessionContext {
            focus: "f".to_string(),
            description: "d".to_string(),
            system_goal: "g".to_string(),
            target_tags: vec!["core".to_string()],
        });
        match phase {
            Phase::Warmup => state.scored_pool.warmup = pool,
            Phase::Workout => state.scored_pool.workout = pool,
            Phase::Cooldown => state.scored_pool.cooldown = pool,
        }
        state
    }

    #[test]
    fn materialize_keeps_order_and_drops_unknown_ids() {
        let pool = vec![
            pooled("a", Phase::Warmup, "pilates"),
            pooled("b", Phase::Warmup, "pilates"),
            pooled("c", Phase::Warmup, "pilates"),
        ];
        let ids = vec![
            "c".to_string(),
            "ghost".to_string(),
            "a".to_string(),
            "c".to_string(),
        ];
        let out = materialize(&ids, &pool);
        let out_ids: Vec<&str> = out.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(out_ids, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn writes_only_its_own_phase_channel() {
        let pool = vec![
            pooled("w1", Phase::Warmup, "pilates"),
            pooled("w2", Phase::Warmup, "yoga"),
            pooled("w3", Phase::Warmup, "pilates"),
        ];
        let llm = FixedLlm(json!({ "variationIds": ["w1", "w2", "w3"] }));
        let state = state_with_pool(Phase::Warmup, pool);

        let update = run(&llm, &state, Phase::Warmup).await.unwrap();
        assert_eq!(update.selected_warmup.as_ref().unwrap().len(), 3);
        assert!(update.selected_workout.is_none());
        assert!(update.selected_cooldown.is_none());
    }

    #[tokio::test]
    async fn no_matching_ids_is_fatal() {
        let pool = vec![pooled("a", Phase::Cooldown, "yoga")];
        let llm = FixedLlm(json!({ "variationIds": ["nope", "also-nope"] }));
        let state = state_with_pool(Phase::Cooldown, pool);

        let err = run(&llm, &state, Phase::Cooldown).await.unwrap_err();
        assert_matches!(
            err,
            GenerationError::EmptySelection {
                phase: Phase::Cooldown
            }
        );
    }

    #[tokio::test]
    async fn empty_pool_makes_any_selection_fatal() {
        let llm = FixedLlm(json!({ "variationIds": ["a"] }));
        let state = state_with_pool(Phase::Workout, vec![]);

        let err = run(&llm, &state, Phase::Workout).await.unwrap_err();
        assert_matches!(err, GenerationError::EmptySelection { .. });
    }

    #[tokio::test]
    async fn single_discipline_workout_is_warned_not_failed() {
        let pool = vec![
            pooled("x1", Phase::Workout, "calisthenics"),
            pooled("x2", Phase::Workout, "calisthenics"),
            pooled("x3", Phase::Workout, "calisthenics"),
            pooled("x4", Phase::Workout, "calisthenics"),
        ];
        let llm = FixedLlm(json!({ "variationIds": ["x1", "x2", "x3", "x4"] }));
        let state = state_with_pool(Phase::Workout, pool);

        let update = run(&llm, &state, Phase::Workout).await.unwrap();
        assert_eq!(update.selected_workout.unwrap().len(), 4);
    }

    #[test]
    fn discipline_count_ignores_case() {
        let selected = vec![
            pooled("a", Phase::Workout, "Pilates"),
            pooled("b", Phase::Workout, "pilates"),
        ];
        assert_eq!(distinct_disciplines(&selected), 1);
    }
}
