//! Node 2: project raw documents to the minimal schemas the graph works on.

use serde_json::Value;

use crate::error::GenerationError;
use crate::graph::state::{GraphState, StateUpdate};
use crate::models::{BaselineMetrics, ExerciseVariation, Phase, UserProfile};

const NODE: &str = "context_cleaner";

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn metric(metrics: Option<&Value>, key: &str) -> f64 {
    metrics
        .and_then(|m| m.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .clamp(0.0, 100.0)
}

/// Project a raw user document. Metrics come from
/// `baselineAssessment.baselineMetrics` when present, zeros otherwise. An
/// already-projected document keeps its root-level `metrics`, which makes
/// the projection idempotent.
pub fn clean_profile(uid: &str, raw: &Value) -> UserProfile {
    let baseline = raw
        .get("baselineAssessment")
        .and_then(|a| a.get("baselineMetrics"))
        .or_else(|| raw.get("metrics"));

    UserProfile {
        uid: uid.to_string(),
        metrics: BaselineMetrics {
            mobility: metric(baseline, "mobility"),
            flexibility: metric(baseline, "flexibility"),
            rotation: metric(baseline, "rotation"),
        },
        discomforts: string_array(raw.get("discomforts")),
        objectives: string_array(raw.get("objectives")),
        preferred_disciplines: string_array(raw.get("preferredDisciplines")),
    }
}

/// Project one raw catalogue entry. Entries without an id are dropped; an
/// unrecognized phase coerces to workout.
pub fn clean_variation(raw: &Value) -> Option<ExerciseVariation> {
    let id = raw.get("id").and_then(Value::as_str)?.trim();
    if id.is_empty() {
        return None;
    }

    let phase = raw
        .get("phase")
        .and_then(Value::as_str)
        .and_then(Phase::parse)
        .unwrap_or(Phase::Workout);

    Some(ExerciseVariation {
        id: id.to_string(),
        name: raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(id)
            .trim()
            .to_string(),
        phase,
        disciplines: string_array(raw.get("disciplines")),
        tags: string_array(raw.get("tags")),
        score: None,
    })
}

/// Replace the raw context channels with their typed projections. Fails only
/// on a completely missing profile or catalogue.
pub fn run(state: &GraphState) -> Result<StateUpdate, GenerationError> {
    let raw_profile = match &state.raw_profile {
        Some(v) if !v.is_null() => v,
        _ => {
            return Err(GenerationError::Validation {
                node: NODE,
                message: "raw profile missing".to_string(),
            })
        }
    };
    let raw_variations = state
        .raw_variations
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "raw catalogue missing".to_string(),
        })?;

    let profile = clean_profile(&state.uid, raw_profile);
    let variations: Vec<ExerciseVariation> =
        raw_variations.iter().filter_map(clean_variation).collect();

    Ok(StateUpdate {
        user_profile: Some(profile),
        available_variations: Some(variations),
        ..Default::default()
    })
}
