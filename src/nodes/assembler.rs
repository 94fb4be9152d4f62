//! Node 6: build the training session for the current day.

use tracing::info;

use crate::dates;
use crate::error::GenerationError;
use crate::graph::state::{GraphState, StateUpdate};
use crate::models::{ExerciseVariation, TrainingSession};

const NODE: &str = "assembler";

fn strip_scores(variations: &[ExerciseVariation]) -> Vec<ExerciseVariation> {
    variations
        .iter()
        .cloned()
        .map(|mut v| {
            v.score = None;
            v
        })
        .collect()
}

/// Joins the three selections into a dated [`TrainingSession`] and appends
/// it to `final_sessions`. Runs strictly after all three selectors.
pub fn run(state: &GraphState) -> Result<StateUpdate, GenerationError> {
    let plan = state
        .weekly_plan
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "weekly plan missing".to_string(),
        })?;
    let context = state
        .current_session_context
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "session context missing".to_string(),
        })?;
    let target_day = *plan.training_days.get(state.current_day_index).ok_or_else(|| {
        GenerationError::Validation {
            node: NODE,
            message: format!("no training day at index {}", state.current_day_index),
        }
    })?;

    for (phase, selected) in [
        ("warmup", &state.selected_warmup),
        ("workout", &state.selected_workout),
        ("cooldown", &state.selected_cooldown),
    ] {
        if selected.is_empty() {
            return Err(GenerationError::Validation {
                node: NODE,
                message: format!("{phase} selection is empty"),
            });
        }
    }

    let session = TrainingSession {
        day_index: target_day,
        date: dates::session_date(plan.start_date, target_day),
        focus: context.focus.clone(),
        description: context.description.clone(),
        warmup: strip_scores(&state.selected_warmup),
        workout: strip_scores(&state.selected_workout),
        cooldown: strip_scores(&state.selected_cooldown),
    };

    info!(
        day_index = session.day_index,
        date = %session.date,
        warmup = session.warmup.len(),
        workout = session.workout.len(),
        cooldown = session.cooldown.len(),
        "session assembled"
    );

    let mut final_sessions = state.final_sessions.clone();
    final_sessions.push(session);

    Ok(StateUpdate {
        final_sessions: Some(final_sessions),
        ..Default::default()
    })
}
