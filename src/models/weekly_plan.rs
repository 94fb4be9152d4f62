use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One skeletal plan entry: a weekday (0 = Sunday .. 6 = Saturday) plus the
/// narrative the loop fills in with concrete variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTrainingDay {
    pub day_index: u8,
    pub focus: String,
    pub description: String,
    pub system_goal: String,
}

/// The weekly plan skeleton as returned by the strategy LLM call, before the
/// start date has been computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanDraft {
    pub total_training_days: u8,
    pub training_days: Vec<u8>,
    pub goal_description: String,
    pub schedule: Vec<ScheduledTrainingDay>,
}

/// The validated weekly plan driving the generation loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub total_training_days: u8,
    pub training_days: Vec<u8>,
    pub start_date: NaiveDate,
    pub goal_description: String,
    pub schedule: Vec<ScheduledTrainingDay>,
}

impl WeeklyPlanDraft {
    /// Checks every structural invariant of the plan skeleton. The strategy
    /// node turns a violation into a fatal plan-invalid error.
    pub fn validate(&self) -> Result<(), String> {
        let total = self.total_training_days as usize;
        if !(1..=7).contains(&total) {
            return Err(format!(
                "totalTrainingDays must be in 1..=7, got {}",
                self.total_training_days
            ));
        }
        if self.training_days.len() != total {
            return Err(format!(
                "trainingDays has {} entries, expected {}",
                self.training_days.len(),
                total
            ));
        }
        if self.schedule.len() != total {
            return Err(format!(
                "schedule has {} entries, expected {}",
                self.schedule.len(),
                total
            ));
        }
        for day in &self.training_days {
            if *day > 6 {
                return Err(format!("day index {day} out of 0..=6"));
            }
        }
        let mut seen = [false; 7];
        for day in &self.training_days {
            if seen[*day as usize] {
                return Err(format!("duplicate training day {day}"));
            }
            seen[*day as usize] = true;
        }
        for (i, entry) in self.schedule.iter().enumerate() {
            if entry.day_index != self.training_days[i] {
                return Err(format!(
                    "schedule[{i}].dayIndex is {}, expected {}",
                    entry.day_index, self.training_days[i]
                ));
            }
            if entry.focus.trim().is_empty() {
                return Err(format!("schedule[{i}].focus is empty"));
            }
            if entry.description.trim().is_empty() {
                return Err(format!("schedule[{i}].description is empty"));
            }
            if entry.system_goal.trim().is_empty() {
                return Err(format!("schedule[{i}].systemGoal is empty"));
            }
        }
        Ok(())
    }

    pub fn into_plan(self, start_date: NaiveDate) -> WeeklyPlan {
        WeeklyPlan {
            total_training_days: self.total_training_days,
            training_days: self.training_days,
            start_date,
            goal_description: self.goal_description,
            schedule: self.schedule,
        }
    }
}
