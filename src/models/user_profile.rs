use serde::{Deserialize, Serialize};

/// Baseline assessment scores, each on a 0..=100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetrics {
    pub mobility: f64,
    pub flexibility: f64,
    pub rotation: f64,
}

/// Minimal projection of a user document, as consumed by the generation
/// graph. Produced by the context cleaner; immutable for the rest of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub metrics: BaselineMetrics,
    pub discomforts: Vec<String>,
    pub objectives: Vec<String>,
    pub preferred_disciplines: Vec<String>,
}
