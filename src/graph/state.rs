//! The single state record threaded through the generation graph.
//!
//! Nodes never mutate state directly: each one reads a snapshot and returns
//! a [`StateUpdate`], a partial mapping of channel to new value. The driver
//! applies updates through per-channel reducers, which is what makes the
//! three-way parallel selector fan-in race-free: each selector writes only
//! its own phase channel.

use serde_json::Value;

use crate::models::{ExerciseVariation, Phase, TrainingSession, UserProfile, WeeklyPlan};

/// Scratch context describing the session currently being generated.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub focus: String,
    pub description: String,
    pub system_goal: String,
    pub target_tags: Vec<String>,
}

/// Per-phase scored candidate lists produced by the filter engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredPool {
    pub warmup: Vec<ExerciseVariation>,
    pub workout: Vec<ExerciseVariation>,
    pub cooldown: Vec<ExerciseVariation>,
}

impl ScoredPool {
    pub fn phase(&self, phase: Phase) -> &[ExerciseVariation] {
        match phase {
            Phase::Warmup => &self.warmup,
            Phase::Workout => &self.workout,
            Phase::Cooldown => &self.cooldown,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphState {
    /// The user this run generates for. Set once at run start.
    pub uid: String,

    // Raw context as loaded from the store; consumed by the context cleaner.
    pub raw_profile: Option<Value>,
    pub raw_variations: Option<Vec<Value>>,

    // Cleaned inputs, immutable for the rest of the run.
    pub user_profile: Option<UserProfile>,
    pub available_variations: Vec<ExerciseVariation>,

    // Variability control.
    pub initial_blacklist: Vec<String>,
    pub session_used_ids: Vec<String>,

    // Orchestration.
    pub weekly_plan: Option<WeeklyPlan>,
    pub final_sessions: Vec<TrainingSession>,

    // Loop control.
    pub current_day_index: usize,
    pub current_session_context: Option<SessionContext>,

    // Per-session scratch.
    pub scored_pool: ScoredPool,
    pub selected_warmup: Vec<ExerciseVariation>,
    pub selected_workout: Vec<ExerciseVariation>,
    pub selected_cooldown: Vec<ExerciseVariation>,
}

impl GraphState {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            ..Self::default()
        }
    }

    pub fn selected(&self, phase: Phase) -> &[ExerciseVariation] {
        match phase {
            Phase::Warmup => &self.selected_warmup,
            Phase::Workout => &self.selected_workout,
            Phase::Cooldown => &self.selected_cooldown,
        }
    }

    /// Apply a partial update. Reducers per channel:
    /// - `session_used_ids` appends,
    /// - `final_sessions` replaces (the assembler builds prior + new),
    /// - every other channel is last-writer-wins.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(v) = update.raw_profile {
            self.raw_profile = Some(v);
        }
        if let Some(v) = update.raw_variations {
            self.raw_variations = Some(v);
        }
        if let Some(v) = update.user_profile {
            self.user_profile = Some(v);
        }
        if let Some(v) = update.available_variations {
            self.available_variations = v;
        }
        if let Some(v) = update.initial_blacklist {
            self.initial_blacklist = v;
        }
        if let Some(mut v) = update.session_used_ids {
            self.session_used_ids.append(&mut v);
        }
        if let Some(v) = update.weekly_plan {
            self.weekly_plan = Some(v);
        }
        if let Some(v) = update.final_sessions {
            self.final_sessions = v;
        }
        if let Some(v) = update.current_day_index {
            self.current_day_index = v;
        }
        if let Some(v) = update.current_session_context {
            self.current_session_context = v;
        }
        if let Some(v) = update.scored_pool {
            self.scored_pool = v;
        }
        if let Some(v) = update.selected_warmup {
            self.selected_warmup = v;
        }
        if let Some(v) = update.selected_workout {
            self.selected_workout = v;
        }
        if let Some(v) = update.selected_cooldown {
            self.selected_cooldown = v;
        }
    }
}

/// A node's partial update. `None` leaves the channel untouched;
/// `current_session_context` distinguishes "leave" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Default)]
pub struct StateUpdate {
    pub raw_profile: Option<Value>,
    pub raw_variations: Option<Vec<Value>>,
    pub user_profile: Option<UserProfile>,
    pub available_variations: Option<Vec<ExerciseVariation>>,
    pub initial_blacklist: Option<Vec<String>>,
    /// Appended, never replaced.
    pub session_used_ids: Option<Vec<String>>,
    pub weekly_plan: Option<WeeklyPlan>,
    pub final_sessions: Option<Vec<TrainingSession>>,
    pub current_day_index: Option<usize>,
    pub current_session_context: Option<Option<SessionContext>>,
    pub scored_pool: Option<ScoredPool>,
    pub selected_warmup: Option<Vec<ExerciseVariation>>,
    pub selected_workout: Option<Vec<ExerciseVariation>>,
    pub selected_cooldown: Option<Vec<ExerciseVariation>>,
}

impl StateUpdate {
    /// Update written by one phase selector: exactly its own channel.
    pub fn for_selection(phase: Phase, variations: Vec<ExerciseVariation>) -> Self {
        let mut update = Self::default();
        match phase {
            Phase::Warmup => update.selected_warmup = Some(variations),
            Phase::Workout => update.selected_workout = Some(variations),
            Phase::Cooldown => update.selected_cooldown = Some(variations),
        }
        update
    }
}
