//! Shared fixtures: a scripted LLM client and golden catalogue builders.

use async_trait::async_trait;
use serde_json::{json, Value};

use trainplan::datastore::MemoryDatastore;
use trainplan::llm::{LlmClient, LlmError, ToolSchema};

/// Deterministic stand-in for the LLM provider. The weekly plan and target
/// tags are fixed at construction; phase selections take the first ids
/// offered in the prompt's pool listing, which keeps every choice inside
/// the pool by construction.
pub struct ScriptedLlm {
    pub training_days: Vec<u8>,
    pub target_tags: Vec<String>,
}

impl ScriptedLlm {
    pub fn new(training_days: &[u8]) -> Self {
        Self {
            training_days: training_days.to_vec(),
            target_tags: vec!["core".to_string(), "legs".to_string(), "push".to_string()],
        }
    }

    fn weekly_plan(&self) -> Value {
        json!({
            "totalTrainingDays": self.training_days.len(),
            "trainingDays": self.training_days,
            "goalDescription": "A balanced, sustainable training week",
            "schedule": self.training_days.iter().map(|d| json!({
                "dayIndex": d,
                "focus": format!("Focus day {d}"),
                "description": format!("Session for weekday {d}"),
                "systemGoal": "Build the weekly base"
            })).collect::<Vec<_>>()
        })
    }
}

/// Ids listed in a selector prompt, in listing order. Pool lines have the
/// shape `- <id> | <name> | ...`.
pub fn pool_ids(prompt: &str) -> Vec<String> {
    prompt
        .lines()
        .filter(|line| line.starts_with("- ") && line.contains(" | "))
        .filter_map(|line| line[2..].split(' ').next())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn invoke(&self, prompt: &str, tool: &ToolSchema) -> Result<Value, LlmError> {
        match tool.name {
            "generate_weekly_plan" => Ok(self.weekly_plan()),
            "select_target_tags" => Ok(json!({ "targetTags": self.target_tags })),
            "select_warmup_variations" => Ok(json!({
                "variationIds": pool_ids(prompt).into_iter().take(3).collect::<Vec<_>>()
            })),
            "select_workout_variations" => Ok(json!({
                "variationIds": pool_ids(prompt).into_iter().take(4).collect::<Vec<_>>()
            })),
            "select_cooldown_variations" => Ok(json!({
                "variationIds": pool_ids(prompt).into_iter().take(3).collect::<Vec<_>>()
            })),
            other => Err(LlmError::NoToolCall {
                expected: other.to_string(),
            }),
        }
    }
}

/// An LLM that fails on every call after the weekly plan; used to check
/// that a mid-run failure persists nothing.
pub struct FailingLlm {
    inner: ScriptedLlm,
}

impl FailingLlm {
    pub fn new(training_days: &[u8]) -> Self {
        Self {
            inner: ScriptedLlm::new(training_days),
        }
    }
}

#[async_trait]
impl LlmClient for FailingLlm {
    async fn invoke(&self, prompt: &str, tool: &ToolSchema) -> Result<Value, LlmError> {
        if tool.name == "generate_weekly_plan" {
            self.inner.invoke(prompt, tool).await
        } else {
            Err(LlmError::Api("provider unavailable".to_string()))
        }
    }
}

/// Seed a store with one user and a tagged catalogue. Workout disciplines
/// alternate so that any first-N workout selection spans two disciplines.
pub fn seeded_store(uid: &str, warmup: usize, workout: usize, cooldown: usize) -> MemoryDatastore {
    let store = MemoryDatastore::new();
    store.insert_user(
        uid,
        json!({
            "displayName": "Golden User",
            "baselineAssessment": {
                "baselineMetrics": { "mobility": 45.0, "flexibility": 60.0, "rotation": 52.0 }
            },
            "discomforts": ["lower back"],
            "objectives": ["general strength"],
            "preferredDisciplines": ["Calisthenics", "Pilates"]
        }),
    );

    let disciplines = ["Calisthenics", "Pilates", "Animal Flow"];
    for i in 0..warmup {
        store.insert_variation(json!({
            "id": format!("warm-{i}"),
            "name": format!("Warmup drill {i}"),
            "phase": "warmup",
            "disciplines": [disciplines[i % 2]],
            "tags": ["core", "legs"]
        }));
    }
    for i in 0..workout {
        store.insert_variation(json!({
            "id": format!("work-{i}"),
            "name": format!("Workout move {i}"),
            "phase": "workout",
            "disciplines": [disciplines[i % 2]],
            "tags": ["core", "push"]
        }));
    }
    for i in 0..cooldown {
        store.insert_variation(json!({
            "id": format!("cool-{i}"),
            "name": format!("Cooldown stretch {i}"),
            "phase": "cooldown",
            "disciplines": [disciplines[i % 3]],
            "tags": ["legs"]
        }));
    }
    store
}
