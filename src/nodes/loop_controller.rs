//! Node 4: the loop gate. Pure routing, no state mutation.

use crate::error::GenerationError;
use crate::graph::state::GraphState;

const NODE: &str = "loop_controller";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ContinueLoop,
    EndLoop,
}

/// `ContinueLoop` iff another scheduled day remains. The counter running
/// past `totalTrainingDays` is a driver bug and fails the run.
pub fn route(state: &GraphState) -> Result<Route, GenerationError> {
    let plan = state
        .weekly_plan
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "weekly plan missing".to_string(),
        })?;

    let total = plan.total_training_days as usize;
    if state.current_day_index > total {
        return Err(GenerationError::Validation {
            node: NODE,
            message: format!(
                "currentDayIndex {} out of 0..={}",
                state.current_day_index, total
            ),
        });
    }

    if state.current_day_index < total {
        Ok(Route::ContinueLoop)
    } else {
        Ok(Route::EndLoop)
    }
}
