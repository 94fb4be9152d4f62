//! Node 5.2: blacklist exclusion, phase bucketing, fuzzy scoring.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::error::GenerationError;
use crate::graph::state::{GraphState, ScoredPool, StateUpdate};
use crate::models::Phase;

const NODE: &str = "filter_engine";

/// Multi-match bonus step: every intersection beyond the first adds 10%.
const MULTI_MATCH_BONUS: f64 = 0.1;

/// Fuzzy match of a variation's tags against the session's target tags.
/// Both sides are compared lowercased and trimmed; the result is always in
/// `[0, 1]`.
pub fn score_variation(tags: &[String], target_tags: &[String]) -> f64 {
    if tags.is_empty() || target_tags.is_empty() {
        return 0.0;
    }

    let targets: HashSet<String> = target_tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .collect();
    let own: HashSet<String> = tags.iter().map(|t| t.trim().to_lowercase()).collect();

    let matches = own.intersection(&targets).count();
    if matches == 0 {
        return 0.0;
    }

    let base = matches as f64 / targets.len() as f64;
    let bonus = if matches <= 1 {
        1.0
    } else {
        1.0 + MULTI_MATCH_BONUS * (matches - 1) as f64
    };
    (base * bonus).min(1.0)
}

/// Builds the scored pool for the current session: drop everything on either
/// blacklist, bucket the survivors by phase, score each bucket against the
/// target tags and sort it descending (stable).
pub fn run(state: &GraphState) -> Result<StateUpdate, GenerationError> {
    let context = state
        .current_session_context
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "session context missing".to_string(),
        })?;

    let excluded: HashSet<&str> = state
        .initial_blacklist
        .iter()
        .chain(&state.session_used_ids)
        .map(String::as_str)
        .collect();

    let mut pool = ScoredPool::default();
    for variation in &state.available_variations {
        if excluded.contains(variation.id.as_str()) {
            continue;
        }
        let mut scored = variation.clone();
        scored.score = Some(score_variation(&scored.tags, &context.target_tags));
        match scored.phase {
            Phase::Warmup => pool.warmup.push(scored),
            Phase::Workout => pool.workout.push(scored),
            Phase::Cooldown => pool.cooldown.push(scored),
        }
    }

    for bucket in [&mut pool.warmup, &mut pool.workout, &mut pool.cooldown] {
        bucket.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
        });
    }

    debug!(
        warmup = pool.warmup.len(),
        workout = pool.workout.len(),
        cooldown = pool.cooldown.len(),
        excluded = excluded.len(),
        "scored candidate pool"
    );

    Ok(StateUpdate {
        scored_pool: Some(pool),
        ..Default::default()
    })
}
