//! The closed set of target tags a session can be characterised by.

/// Anatomy targets.
pub const ANATOMY_TAGS: &[&str] = &["chest", "back", "legs", "shoulders", "core"];

/// Movement patterns.
pub const PATTERN_TAGS: &[&str] = &["push", "pull", "squat", "hinge", "lunge", "rotation"];

/// Training modalities.
pub const MODALITY_TAGS: &[&str] = &[
    "unilateral",
    "bilateral",
    "isometric",
    "explosive",
    "plyometric",
];

/// Every tag the phase orchestrator is allowed to emit.
pub const ALLOWED_TAGS: &[&str] = &[
    "chest",
    "back",
    "legs",
    "shoulders",
    "core",
    "push",
    "pull",
    "squat",
    "hinge",
    "lunge",
    "rotation",
    "unilateral",
    "bilateral",
    "isometric",
    "explosive",
    "plyometric",
];

pub fn is_allowed(tag: &str) -> bool {
    let tag = tag.trim().to_lowercase();
    ALLOWED_TAGS.contains(&tag.as_str())
}

/// Lowercases, trims, deduplicates, and drops anything outside the closed
/// set. Order of first occurrence is preserved.
pub fn sanitize(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let normalized = tag.trim().to_lowercase();
        if ALLOWED_TAGS.contains(&normalized.as_str()) && !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}
