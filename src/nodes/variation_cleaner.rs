//! Node 5.3: threshold and cap each phase's scored pool.

use tracing::debug;

use crate::error::GenerationError;
use crate::graph::state::{GraphState, ScoredPool, StateUpdate};
use crate::models::ExerciseVariation;

pub const WARMUP_CAP: usize = 15;
pub const WORKOUT_CAP: usize = 20;
pub const COOLDOWN_CAP: usize = 12;
pub const MIN_SCORE: f64 = 0.2;

/// Pools smaller than this pass through untouched, and a thresholded result
/// smaller than this falls back to the top of the original pool.
pub const MIN_POOL: usize = 5;

/// Apply the shared per-phase policy to one (already sorted) pool.
pub fn clean_pool(pool: &[ExerciseVariation], cap: usize) -> Vec<ExerciseVariation> {
    if pool.len() < MIN_POOL {
        return pool.to_vec();
    }

    let kept: Vec<ExerciseVariation> = pool
        .iter()
        .filter(|v| v.score.unwrap_or(0.0) >= MIN_SCORE)
        .take(cap)
        .cloned()
        .collect();

    if kept.len() < MIN_POOL {
        pool.iter().take(cap).cloned().collect()
    } else {
        kept
    }
}

pub fn run(state: &GraphState) -> Result<StateUpdate, GenerationError> {
    let pool = ScoredPool {
        warmup: clean_pool(&state.scored_pool.warmup, WARMUP_CAP),
        workout: clean_pool(&state.scored_pool.workout, WORKOUT_CAP),
        cooldown: clean_pool(&state.scored_pool.cooldown, COOLDOWN_CAP),
    };

    debug!(
        warmup = pool.warmup.len(),
        workout = pool.workout.len(),
        cooldown = pool.cooldown.len(),
        "cleaned candidate pool"
    );

    Ok(StateUpdate {
        scored_pool: Some(pool),
        ..Default::default()
    })
}
