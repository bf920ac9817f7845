//! The seams of one simulation tick.
//!
//! Each stage of the loop talks to its neighbor through one of these traits,
//! so any of them can be swapped for a fake in tests or a different model in
//! production.

use anima_core::{BioPulse, BioRate, BioState, ChronicState, FeedbackEnvelope, Personality};
use anima_limbic::{BioTickResult, Engine};
use anima_mind::consciousness::{ParsedResponse, PromptContext};
use anima_mind::{DefaultMotivation, MotivationState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// External effects and action gating drained for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub pre_bio_rates: Vec<BioRate>,
    pub pre_bio_pulses: Vec<BioPulse>,
    /// Missing entry means not allowed.
    pub allowed_actions: HashMap<String, bool>,
    pub now_seconds: i64,
    pub external_text: String,
}

impl TickInput {
    pub fn has_pre_bio_effects(&self) -> bool {
        !self.pre_bio_rates.is_empty() || !self.pre_bio_pulses.is_empty()
    }

    pub fn is_allowed(&self, action: &str) -> bool {
        self.allowed_actions.get(action).copied().unwrap_or(false)
    }

    pub fn pre_bio_envelope(&self) -> FeedbackEnvelope {
        FeedbackEnvelope {
            rates: self.pre_bio_rates.clone(),
            pulses: self.pre_bio_pulses.clone(),
        }
    }
}

/// Everything the mind sees on one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindRequest {
    pub bio: BioState,
    pub motivation: MotivationState,
    pub prompt: PromptContext,
    pub input: TickInput,
    pub prior_parsed: ParsedResponse,
}

/// Drains pending external input exactly once per tick.
pub trait InputDrainer: Send + Sync {
    fn drain(&self) -> TickInput;
}

/// Advances the bio state by one tick.
pub trait BioEngine: Send {
    fn tick(&mut self, state: &mut BioState, dt: f64) -> BioTickResult;
}

/// Pure drive computation.
pub trait MotivationComputer: Send + Sync {
    fn compute(
        &self,
        bio: &BioState,
        personality: &Personality,
        chronic: &ChronicState,
    ) -> MotivationState;
}

/// Produces one raw, tagged response per tick.
pub trait MindResponder: Send {
    fn respond(&mut self, request: &MindRequest) -> String;
}

impl<T: InputDrainer + ?Sized> InputDrainer for Arc<T> {
    fn drain(&self) -> TickInput {
        (**self).drain()
    }
}

impl BioEngine for Engine {
    fn tick(&mut self, state: &mut BioState, dt: f64) -> BioTickResult {
        Engine::tick(self, state, dt)
    }
}

impl MotivationComputer for DefaultMotivation {
    fn compute(
        &self,
        bio: &BioState,
        personality: &Personality,
        chronic: &ChronicState,
    ) -> MotivationState {
        DefaultMotivation::compute(self, bio, personality, chronic)
    }
}
