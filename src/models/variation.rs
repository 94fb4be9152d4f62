use std::fmt;

use serde::{Deserialize, Serialize};

/// The three phases a training session is built from. Every catalogue
/// variation belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Warmup,
    Workout,
    Cooldown,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Warmup, Phase::Workout, Phase::Cooldown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Warmup => "warmup",
            Phase::Workout => "workout",
            Phase::Cooldown => "cooldown",
        }
    }

    /// Case-insensitive parse. Unknown values are rejected here; the context
    /// cleaner coerces them to `Workout` instead.
    pub fn parse(value: &str) -> Option<Phase> {
        match value.trim().to_lowercase().as_str() {
            "warmup" => Some(Phase::Warmup),
            "workout" => Some(Phase::Workout),
            "cooldown" => Some(Phase::Cooldown),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the exercise catalogue. `score` is transient: it is absent on
/// loaded variations and populated by the filter engine for the current
/// session only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseVariation {
    pub id: String,
    pub name: String,
    pub phase: Phase,
    #[serde(default)]
    pub disciplines: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
