//! Drive urgencies.
//!
//! Five drives are derived from the bio state, shaped by personality and
//! chronic pressure. The computation is pure and deterministic; every input is
//! clamped before use so it tolerates out-of-range state.

use anima_core::{clamp, BioField, BioState, ChronicState, Personality, BODY_TEMP_BASELINE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[inline]
pub(crate) fn clamp01(v: f64) -> f64 {
    clamp(v, 0.0, 1.0)
}

// ============================================================================
// Drives & Actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drive {
    Energy,
    SocialConnection,
    #[serde(rename = "stimulation_novelty")]
    Stimulation,
    Safety,
    IdentityCoherence,
}

impl Drive {
    /// Tie-break order: earlier wins when urgencies are equal.
    pub const PRIORITY: [Drive; 5] = [
        Drive::Safety,
        Drive::Energy,
        Drive::SocialConnection,
        Drive::IdentityCoherence,
        Drive::Stimulation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Drive::Energy => "energy",
            Drive::SocialConnection => "social_connection",
            Drive::Stimulation => "stimulation_novelty",
            Drive::Safety => "safety",
            Drive::IdentityCoherence => "identity_coherence",
        }
    }

    /// Position in [`Drive::PRIORITY`]; lower wins ties.
    pub fn priority(self) -> usize {
        match self {
            Drive::Safety => 0,
            Drive::Energy => 1,
            Drive::SocialConnection => 2,
            Drive::IdentityCoherence => 3,
            Drive::Stimulation => 4,
        }
    }
}

impl fmt::Display for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Drive {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "energy" => Ok(Drive::Energy),
            "social_connection" => Ok(Drive::SocialConnection),
            "stimulation_novelty" => Ok(Drive::Stimulation),
            "safety" => Ok(Drive::Safety),
            "identity_coherence" => Ok(Drive::IdentityCoherence),
            _ => Err(()),
        }
    }
}

/// The closed vocabulary of regulating actions.
///
/// Parsed responses carry the action as free text; anything outside this set
/// simply produces no bio effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Rest,
    Eat,
    Hydrate,
    ReachOut,
    Journal,
    Breathe,
    #[serde(rename = "scan_environment")]
    ScanArea,
    SeekWarmth,
    SeekCooling,
    MicroTask,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Rest,
        Action::Eat,
        Action::Hydrate,
        Action::ReachOut,
        Action::Journal,
        Action::Breathe,
        Action::ScanArea,
        Action::SeekWarmth,
        Action::SeekCooling,
        Action::MicroTask,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Rest => "rest",
            Action::Eat => "eat",
            Action::Hydrate => "hydrate",
            Action::ReachOut => "reach_out",
            Action::Journal => "journal",
            Action::Breathe => "breathe",
            Action::ScanArea => "scan_environment",
            Action::SeekWarmth => "seek_warmth",
            Action::SeekCooling => "seek_cooling",
            Action::MicroTask => "micro_task",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Action::ALL.into_iter().find(|a| a.as_str() == s).ok_or(())
    }
}

// ============================================================================
// Motivation State
// ============================================================================

/// Urgency of each drive in [0, 1], plus the winning goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotivationState {
    pub energy_urgency: f64,
    pub social_urgency: f64,
    pub stimulation_urgency: f64,
    pub safety_urgency: f64,
    pub identity_urgency: f64,

    pub active_goal: Drive,
    pub active_goal_urgency: f64,
}

impl Default for MotivationState {
    fn default() -> Self {
        Self {
            energy_urgency: 0.0,
            social_urgency: 0.0,
            stimulation_urgency: 0.0,
            safety_urgency: 0.0,
            identity_urgency: 0.0,
            active_goal: Drive::Safety,
            active_goal_urgency: 0.0,
        }
    }
}

impl MotivationState {
    pub fn urgency(&self, drive: Drive) -> f64 {
        match drive {
            Drive::Energy => self.energy_urgency,
            Drive::SocialConnection => self.social_urgency,
            Drive::Stimulation => self.stimulation_urgency,
            Drive::Safety => self.safety_urgency,
            Drive::IdentityCoherence => self.identity_urgency,
        }
    }

    pub fn urgency_mut(&mut self, drive: Drive) -> &mut f64 {
        match drive {
            Drive::Energy => &mut self.energy_urgency,
            Drive::SocialConnection => &mut self.social_urgency,
            Drive::Stimulation => &mut self.stimulation_urgency,
            Drive::Safety => &mut self.safety_urgency,
            Drive::IdentityCoherence => &mut self.identity_urgency,
        }
    }

    /// Drives sorted by clamped urgency, highest first; ties go to
    /// [`Drive::PRIORITY`] order.
    pub fn ranked(&self) -> Vec<(Drive, f64)> {
        let mut drives: Vec<(Drive, f64)> = Drive::PRIORITY
            .into_iter()
            .map(|d| (d, clamp01(self.urgency(d))))
            .collect();
        // Stable sort keeps PRIORITY order among equal urgencies.
        drives.sort_by(|a, b| b.1.total_cmp(&a.1));
        drives
    }

    /// Recompute the active goal from the current urgencies.
    pub fn reselect_goal(&mut self) {
        let (drive, urgency) = self.ranked()[0];
        self.active_goal = drive;
        self.active_goal_urgency = urgency;
    }
}

// ============================================================================
// Computation
// ============================================================================

/// How far body temperature sits from baseline, normalized over 6 degrees.
fn temp_deviation(body_temp: f64) -> f64 {
    clamp01((body_temp - BODY_TEMP_BASELINE).abs() / 6.0)
}

// Lower resilience and lower tolerance raise felt urgency.
fn energy_multiplier(p: &Personality) -> f64 {
    clamp(
        1.0 + 0.6 * (0.5 - p.energy_resilience) + 0.3 * (0.5 - p.frustration_tolerance),
        0.5,
        1.5,
    )
}

fn social_multiplier(p: &Personality) -> f64 {
    clamp(1.0 + 0.8 * (p.social_factor - 0.5), 0.6, 1.4)
}

fn stimulation_multiplier(p: &Personality) -> f64 {
    clamp(1.0 + 0.8 * (p.curiosity - 0.5), 0.6, 1.4)
}

fn safety_multiplier(p: &Personality) -> f64 {
    clamp(
        1.0 + 0.6 * (p.stress_sensitivity - 0.5) + 0.4 * (p.risk_aversion - 0.5),
        0.5,
        1.5,
    )
}

fn identity_multiplier(p: &Personality) -> f64 {
    clamp(
        1.0 + 0.6 * (p.self_observation - 0.5) + 0.3 * (0.5 - p.frustration_tolerance),
        0.5,
        1.5,
    )
}

fn normalized(bio: &BioState) -> BioState {
    let mut b = bio.clone();
    for field in BioField::ALL {
        let range = field.range();
        let slot = b.field_mut(field);
        let v = if slot.is_finite() { *slot } else { field.baseline() };
        *slot = clamp(v, range.min, range.max);
    }
    b
}

/// Compute drive urgencies and the active goal.
pub fn compute(bio: &BioState, personality: &Personality, chronic: &ChronicState) -> MotivationState {
    let b = normalized(bio);
    let p = personality.clamped();
    let c = chronic.clamped();

    let energy_base =
        clamp01(0.65 * (1.0 - b.energy) + 0.35 * b.hunger + 0.15 * c.fatigue_pressure);
    let social_base = clamp01(b.social_deficit + 0.25 * c.isolation_load);
    let stim_base = clamp01(0.60 * (1.0 - b.cognitive_capacity) + 0.40 * (1.0 - b.mood));
    let safety_base = clamp01(
        0.50 * b.stress
            + 0.25 * b.physical_tension
            + 0.25 * temp_deviation(b.body_temp)
            + 0.20 * c.threat_load,
    );
    let identity_base = clamp01(
        0.55 * (1.0 - b.mood) + 0.45 * (1.0 - b.cognitive_capacity) + 0.20 * c.identity_strain,
    );

    let mut state = MotivationState {
        energy_urgency: clamp01(energy_base * energy_multiplier(&p)),
        social_urgency: clamp01(social_base * social_multiplier(&p)),
        stimulation_urgency: clamp01(stim_base * stimulation_multiplier(&p)),
        safety_urgency: clamp01(safety_base * safety_multiplier(&p)),
        identity_urgency: clamp01(identity_base * identity_multiplier(&p)),
        ..MotivationState::default()
    };
    state.reselect_goal();
    state
}

/// The stock drive computation, usable wherever a motivation collaborator
/// is expected.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMotivation;

impl DefaultMotivation {
    pub fn compute(
        &self,
        bio: &BioState,
        personality: &Personality,
        chronic: &ChronicState,
    ) -> MotivationState {
        compute(bio, personality, chronic)
    }
}

// ============================================================================
// Action Candidates
// ============================================================================

/// What the environment currently makes possible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConstraints {
    pub has_food: bool,
    pub has_people_nearby: bool,
    pub can_rest: bool,
    pub can_explore: bool,
    pub has_quiet_space: bool,
}

/// Deterministic candidate actions for a goal, most direct first.
pub fn action_candidates_for(goal: Drive, c: &ActionConstraints) -> Vec<Action> {
    let mut actions = Vec::with_capacity(3);
    match goal {
        Drive::Energy => {
            if c.has_food {
                actions.push(Action::Eat);
            }
            if c.can_rest {
                actions.push(Action::Rest);
            }
            actions.push(Action::Hydrate);
        }
        Drive::SocialConnection => {
            if c.has_people_nearby {
                actions.push(Action::ReachOut);
            }
            actions.push(Action::Journal);
        }
        Drive::Stimulation => {
            actions.push(Action::MicroTask);
            if c.can_explore {
                actions.push(Action::ScanArea);
            }
        }
        Drive::Safety => {
            actions.push(Action::Breathe);
            actions.push(Action::ScanArea);
            if c.has_quiet_space {
                actions.push(Action::Rest);
            }
        }
        Drive::IdentityCoherence => {
            actions.push(Action::Journal);
            if c.has_quiet_space {
                actions.push(Action::Breathe);
            }
        }
    }
    actions
}
