//! Node 7: roll half of the freshly-chosen ids into the intra-week
//! blacklist and advance the loop.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::graph::state::{GraphState, ScoredPool, StateUpdate};
use crate::models::ExerciseVariation;

/// Uniformly pick `ceil(len / 2)` of the given ids. The RNG is injected so
/// tests can pin a seed.
pub fn roll_half<R: Rng>(variations: &[ExerciseVariation], rng: &mut R) -> Vec<String> {
    let mut ids: Vec<String> = variations.iter().map(|v| v.id.clone()).collect();
    ids.shuffle(rng);
    ids.truncate(ids.len().div_ceil(2));
    ids
}

/// The only place the 50% rule is applied: persistence later writes the
/// accumulated list verbatim.
pub fn run<R: Rng>(state: &GraphState, rng: &mut R) -> StateUpdate {
    let mut rolled = Vec::new();
    rolled.extend(roll_half(&state.selected_warmup, rng));
    rolled.extend(roll_half(&state.selected_workout, rng));
    rolled.extend(roll_half(&state.selected_cooldown, rng));

    info!(
        day_index = state.current_day_index,
        rolled = rolled.len(),
        blacklist_total = state.session_used_ids.len() + rolled.len(),
        "session ids rolled into intra-week blacklist"
    );

    StateUpdate {
        session_used_ids: Some(rolled),
        current_day_index: Some(state.current_day_index + 1),
        current_session_context: Some(None),
        scored_pool: Some(ScoredPool::default()),
        selected_warmup: Some(vec![]),
        selected_workout: Some(vec![]),
        selected_cooldown: Some(vec![]),
        ..Default::default()
    }
}
