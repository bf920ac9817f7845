//! Translate drive urgencies into felt experience.
//!
//! The mind is never shown numbers. Each drive is described in one of four
//! intensities, the two most urgent drives are foregrounded, and the active
//! goal surfaces as an implicit pull.

use super::types::{PromptContext, PromptDrive, Thought};
use crate::motivation::{Drive, MotivationState};

const PRIMARY_COUNT: usize = 2;

pub fn build_prompt_context(state: &MotivationState) -> PromptContext {
    build_prompt_context_with_continuity(state, &[])
}

pub fn build_prompt_context_with_continuity(
    state: &MotivationState,
    continuity: &[Thought],
) -> PromptContext {
    let ranked = state.ranked();
    let split = PRIMARY_COUNT.min(ranked.len());
    let describe = |&(drive, urgency): &(Drive, f64)| PromptDrive {
        drive,
        felt: felt_experience(drive, urgency).to_string(),
    };

    PromptContext {
        primary: ranked[..split].iter().map(describe).collect(),
        background: ranked[split..].iter().map(describe).collect(),
        goal_pull: goal_pull(state.active_goal).to_string(),
        continuity: continuity_lines(continuity),
    }
}

/// 0..=3 for urgency below 0.25, 0.5, 0.75, and at or above 0.75.
pub fn urgency_level(urgency: f64) -> usize {
    match urgency {
        u if u >= 0.75 => 3,
        u if u >= 0.50 => 2,
        u if u >= 0.25 => 1,
        _ => 0,
    }
}

pub fn felt_experience(drive: Drive, urgency: f64) -> &'static str {
    let levels: [&'static str; 4] = match drive {
        Drive::Energy => [
            "a faint pull toward rest and nourishment lingers in the background.",
            "a noticeable fatigue-and-hunger pull is starting to build.",
            "an insistent need for rest and nourishment is pressing into attention.",
            "an urgent depletion is dominating attention and demanding recovery now.",
        ],
        Drive::SocialConnection => [
            "a light sense of distance from others is present.",
            "a growing wish for contact and response is becoming noticeable.",
            "an insistent loneliness is pressing for connection.",
            "an urgent need to reach someone is dominating focus.",
        ],
        Drive::Stimulation => [
            "a mild restlessness for novelty hums in the background.",
            "a noticeable urge for engagement and novelty is rising.",
            "an insistent need for stimulation is pushing for action.",
            "an urgent craving for meaningful engagement is taking over attention.",
        ],
        Drive::Safety => [
            "a faint vigilance remains in the background.",
            "a noticeable need to check for safety is surfacing.",
            "an insistent threat-sensitivity is narrowing attention.",
            "an urgent need to secure safety is dominating attention.",
        ],
        Drive::IdentityCoherence => [
            "a light pull to make sense of experience is present.",
            "a noticeable tension about self-coherence is forming.",
            "an insistent need to regain internal coherence is pressing.",
            "an urgent need to stabilize meaning and identity is overwhelming focus.",
        ],
    };
    levels[urgency_level(urgency.clamp(0.0, 1.0))]
}

pub fn goal_pull(drive: Drive) -> &'static str {
    match drive {
        Drive::Energy => "A pull toward food, water, and recovery keeps surfacing.",
        Drive::SocialConnection => "A pull toward contact and response keeps surfacing.",
        Drive::Stimulation => "A pull toward something engaging and novel keeps surfacing.",
        Drive::Safety => "A pull toward checking safety and reducing threat keeps surfacing.",
        Drive::IdentityCoherence => "A pull toward making sense of experience keeps surfacing.",
    }
}

/// The intrusive thought a drive produces when it wins attention.
pub fn drive_thought_text(drive: Drive) -> &'static str {
    match drive {
        Drive::Energy => "Food and recovery keep intruding into thought.",
        Drive::SocialConnection => "The need for contact keeps returning to mind.",
        Drive::Stimulation => "A search for novelty keeps tugging at attention.",
        Drive::Safety => "Threat-checking keeps cycling through awareness.",
        Drive::IdentityCoherence => "A need to make sense of self keeps pressing forward.",
    }
}

fn continuity_lines(continuity: &[Thought]) -> Vec<String> {
    continuity
        .iter()
        .map(|t| t.text.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
