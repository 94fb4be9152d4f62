use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::variation::ExerciseVariation;

/// A fully-populated training day: a concrete calendar date and the three
/// phase lists chosen from the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub day_index: u8,
    pub date: NaiveDate,
    pub focus: String,
    pub description: String,
    pub warmup: Vec<ExerciseVariation>,
    pub workout: Vec<ExerciseVariation>,
    pub cooldown: Vec<ExerciseVariation>,
}

impl TrainingSession {
    /// Iterate every variation id across all three phases.
    pub fn variation_ids(&self) -> impl Iterator<Item = &str> {
        self.warmup
            .iter()
            .chain(&self.workout)
            .chain(&self.cooldown)
            .map(|v| v.id.as_str())
    }
}
