//! Prompt builders for the three LLM nodes.

use std::fmt::Write;

use crate::graph::state::SessionContext;
use crate::models::tags::{ANATOMY_TAGS, MODALITY_TAGS, PATTERN_TAGS};
use crate::models::{ExerciseVariation, Phase, ScheduledTrainingDay, UserProfile};

use super::schemas::selection_bounds;

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Strategy prompt: the cleaned profile plus planning guidance.
pub fn weekly_plan_prompt(profile: &UserProfile) -> String {
    format!(
        r#"You are a personal training coach designing one week of training.

USER PROFILE
- Baseline mobility: {mobility:.0}/100
- Baseline flexibility: {flexibility:.0}/100
- Baseline rotation: {rotation:.0}/100
- Discomforts: {discomforts}
- Objectives: {objectives}
- Preferred disciplines: {disciplines}

GUIDANCE
- Balance the week holistically across the body and across intensities.
- Accommodate the data: low mobility or flexibility scores deserve a dedicated
  mobility-focused day; never schedule a focus that aggravates a reported
  discomfort.
- Pick a realistic number of training days, between 3 and 6, that the user can
  sustain permanently. More is not better.
- Each scheduled day needs a focus, a user-facing description, and a
  systemGoal stating what the session contributes to the week.

Call generate_weekly_plan with the full skeleton."#,
        mobility = profile.metrics.mobility,
        flexibility = profile.metrics.flexibility,
        rotation = profile.metrics.rotation,
        discomforts = join_or(&profile.discomforts, "none reported"),
        objectives = join_or(&profile.objectives, "general fitness"),
        disciplines = join_or(&profile.preferred_disciplines, "no preference"),
    )
}

/// Orchestrator prompt: the scheduled day plus the closed tag set.
pub fn target_tags_prompt(day: &ScheduledTrainingDay, profile: &UserProfile) -> String {
    format!(
        r#"You are preparing one training session of a weekly plan.

SESSION
- Focus: {focus}
- Description: {description}
- Goal within the week: {system_goal}

USER
- Discomforts: {discomforts}
- Preferred disciplines: {disciplines}

Choose between 3 and 8 target tags characterising this session. Only these
tags exist:
- anatomy: {anatomy}
- movement pattern: {pattern}
- modality: {modality}

Call select_target_tags with your choice."#,
        focus = day.focus,
        description = day.description,
        system_goal = day.system_goal,
        discomforts = join_or(&profile.discomforts, "none reported"),
        disciplines = join_or(&profile.preferred_disciplines, "no preference"),
        anatomy = ANATOMY_TAGS.join(", "),
        pattern = PATTERN_TAGS.join(", "),
        modality = MODALITY_TAGS.join(", "),
    )
}

/// Selector prompt: session context plus the scored pool for one phase.
///
/// Pool lines start with `- <id> |` so a selection can only reference ids
/// that are literally present in the prompt.
pub fn phase_selection_prompt(
    phase: Phase,
    context: &SessionContext,
    pool: &[ExerciseVariation],
) -> String {
    let (min, max) = selection_bounds(phase);
    let mut listing = String::new();
    for v in pool {
        let _ = writeln!(
            listing,
            "- {} | {} | tags: {} | disciplines: {} | match: {:.2}",
            v.id,
            v.name,
            join_or(&v.tags, "-"),
            join_or(&v.disciplines, "-"),
            v.score.unwrap_or(0.0),
        );
    }

    let extra_rule = match phase {
        Phase::Workout => {
            "\n- The chosen set must span at least two distinct disciplines."
        }
        _ => "",
    };

    format!(
        r#"You are picking the {phase} block of a training session.

SESSION
- Focus: {focus}
- Description: {description}
- Goal within the week: {system_goal}
- Target tags: {tags}

AVAILABLE {phase_upper} VARIATIONS (higher match = closer to the target tags)
{listing}
RULES
- Choose between {min} and {max} variations.
- Use only ids from the list above.{extra_rule}

Call {tool_name} with the chosen ids."#,
        phase = phase,
        focus = context.focus,
        description = context.description,
        system_goal = context.system_goal,
        tags = context.target_tags.join(", "),
        phase_upper = phase.as_str().to_uppercase(),
        listing = listing,
        min = min,
        max = max,
        extra_rule = extra_rule,
        tool_name = super::schemas::select_phase_variations(phase).name,
    )
}
