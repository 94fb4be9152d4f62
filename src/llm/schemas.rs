//! The three tool definitions the generation graph calls with.

use serde_json::json;

use crate::models::tags::ALLOWED_TAGS;
use crate::models::Phase;

use super::ToolSchema;

/// How many variations each phase selector must pick.
pub fn selection_bounds(phase: Phase) -> (usize, usize) {
    match phase {
        Phase::Warmup => (3, 5),
        Phase::Workout => (4, 6),
        Phase::Cooldown => (3, 4),
    }
}

/// Strategy node: the weekly plan skeleton, start date excluded (it is
/// computed locally afterwards).
pub fn generate_weekly_plan() -> ToolSchema {
    ToolSchema {
        name: "generate_weekly_plan",
        description: "Produce the weekly training plan skeleton for the user.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "totalTrainingDays": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 7,
                    "description": "Number of training days this week; 3 to 6 is realistic for almost everyone."
                },
                "trainingDays": {
                    "type": "array",
                    "items": { "type": "integer", "minimum": 0, "maximum": 6 },
                    "uniqueItems": true,
                    "description": "Weekday indices, 0=Sunday through 6=Saturday, one per training day."
                },
                "goalDescription": {
                    "type": "string",
                    "description": "One paragraph describing the week's overall goal."
                },
                "schedule": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "dayIndex": { "type": "integer", "minimum": 0, "maximum": 6 },
                            "focus": { "type": "string" },
                            "description": { "type": "string" },
                            "systemGoal": { "type": "string" }
                        },
                        "required": ["dayIndex", "focus", "description", "systemGoal"]
                    },
                    "description": "One entry per training day, aligned with trainingDays."
                }
            },
            "required": ["totalTrainingDays", "trainingDays", "goalDescription", "schedule"]
        }),
    }
}

/// Phase orchestrator: 3-8 tags from the closed set.
pub fn select_target_tags() -> ToolSchema {
    ToolSchema {
        name: "select_target_tags",
        description: "Choose the target tags characterising the current session.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "targetTags": {
                    "type": "array",
                    "items": { "type": "string", "enum": ALLOWED_TAGS },
                    "minItems": 3,
                    "maxItems": 8,
                    "description": "Anatomy, movement-pattern and modality tags for this session."
                }
            },
            "required": ["targetTags"]
        }),
    }
}

/// Phase selector: ids picked from the scored pool, counts bounded per phase.
pub fn select_phase_variations(phase: Phase) -> ToolSchema {
    let (min, max) = selection_bounds(phase);
    let name = match phase {
        Phase::Warmup => "select_warmup_variations",
        Phase::Workout => "select_workout_variations",
        Phase::Cooldown => "select_cooldown_variations",
    };
    ToolSchema {
        name,
        description: format!("Choose the {phase} variations for the current session."),
        parameters: json!({
            "type": "object",
            "properties": {
                "variationIds": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": min,
                    "maxItems": max,
                    "description": "Ids of the chosen variations; every id must come from the provided pool."
                }
            },
            "required": ["variationIds"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_bounds_per_phase() {
        assert_eq!(selection_bounds(Phase::Warmup), (3, 5));
        assert_eq!(selection_bounds(Phase::Workout), (4, 6));
        assert_eq!(selection_bounds(Phase::Cooldown), (3, 4));
    }

    #[test]
    fn selector_tool_names_are_phase_specific() {
        assert_eq!(
            select_phase_variations(Phase::Warmup).name,
            "select_warmup_variations"
        );
        assert_eq!(
            select_phase_variations(Phase::Cooldown).name,
            "select_cooldown_variations"
        );
    }

    #[test]
    fn target_tag_schema_embeds_closed_set() {
        let schema = select_target_tags();
        let enum_values = schema.parameters["properties"]["targetTags"]["items"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(enum_values.len(), ALLOWED_TAGS.len());
    }
}
