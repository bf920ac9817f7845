//! Pending operator input.
//!
//! Lines may be enqueued from any thread at any time. Once per tick the loop
//! drains the whole queue; the lock is held only long enough to swap the
//! queue out, and classification happens after it is released. Anything
//! enqueued after the swap waits for the next drain.

use crate::collaborators::{InputDrainer, TickInput};
use crate::sense::{ConventionParser, InputKind, SenseParser};
use anima_core::{BioField, BioPulse, BioRate};
use anima_mind::Action;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

pub struct InputAdapter {
    queue: Mutex<Vec<String>>,
    parser: Box<dyn SenseParser>,
    clock: Clock,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(ConventionParser)
    }
}

impl InputAdapter {
    /// Adapter reading the wall clock in whole seconds.
    pub fn new(parser: impl SenseParser + 'static) -> Self {
        Self::with_clock(parser, || chrono::Utc::now().timestamp())
    }

    pub fn with_clock(
        parser: impl SenseParser + 'static,
        clock: impl Fn() -> i64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            parser: Box::new(parser),
            clock: Box::new(clock),
        }
    }

    pub fn enqueue(&self, raw: impl Into<String>) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(raw.into());
    }

    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl InputDrainer for InputAdapter {
    fn drain(&self) -> TickInput {
        let raw_items = std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner));

        let mut out = TickInput {
            allowed_actions: default_allowed_actions(),
            now_seconds: (self.clock)(),
            ..TickInput::default()
        };

        let mut external = Vec::with_capacity(raw_items.len());
        for raw in &raw_items {
            let Some(parsed) = self.parser.parse(raw) else {
                continue;
            };
            external.push(raw.trim().to_string());

            match parsed.kind {
                InputKind::Action => apply_action_input(&parsed.content, &mut out),
                InputKind::Environment => apply_environment_input(&parsed.content, &mut out),
                InputKind::Speech => {}
            }
        }

        if !raw_items.is_empty() {
            tracing::debug!(
                lines = raw_items.len(),
                accepted = external.len(),
                pulses = out.pre_bio_pulses.len(),
                rates = out.pre_bio_rates.len(),
                "drained operator input"
            );
        }
        out.external_text = external.join("\n");
        out
    }
}

/// Every known action, permitted.
pub fn default_allowed_actions() -> HashMap<String, bool> {
    Action::ALL
        .into_iter()
        .map(|a| (a.as_str().to_string(), true))
        .collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn set_allowed(out: &mut TickInput, action: Action, allowed: bool) {
    out.allowed_actions.insert(action.as_str().to_string(), allowed);
}

/// Something done to the person: immediate pulses.
pub(crate) fn apply_action_input(content: &str, out: &mut TickInput) {
    let lower = content.to_lowercase();

    if contains_any(&lower, &["punch", "hit", "kick", "slap", "strike", "shove", "attack"]) {
        out.pre_bio_pulses.extend([
            BioPulse::new(BioField::Stress, 0.20),
            BioPulse::new(BioField::PhysicalTension, 0.15),
            BioPulse::new(BioField::Mood, -0.08),
        ]);
    }

    if contains_any(&lower, &["hug", "comfort", "reassure", "support", "care"]) {
        out.pre_bio_pulses.extend([
            BioPulse::new(BioField::Stress, -0.12),
            BioPulse::new(BioField::PhysicalTension, -0.08),
            BioPulse::new(BioField::Mood, 0.08),
        ]);
    }

    if contains_any(&lower, &["feed", "food", "meal", "snack"]) {
        out.pre_bio_pulses.push(BioPulse::new(BioField::Hunger, -0.20));
        set_allowed(out, Action::Eat, true);
    }
}

/// A description of the surroundings: sustained rates plus action gating.
pub(crate) fn apply_environment_input(content: &str, out: &mut TickInput) {
    let lower = content.to_lowercase();

    if contains_any(&lower, &["cold", "freezing", "chilly", "frigid"]) {
        out.pre_bio_rates.push(BioRate::new(BioField::BodyTemp, -0.03));
    }
    if contains_any(&lower, &["hot", "heat", "scorching", "sweltering"]) {
        out.pre_bio_rates.push(BioRate::new(BioField::BodyTemp, 0.03));
    }
    if contains_any(&lower, &["loud", "crowd", "chaos", "sirens"]) {
        out.pre_bio_rates.push(BioRate::new(BioField::Stress, 0.03));
    }
    if contains_any(&lower, &["quiet", "calm", "safe", "peaceful"]) {
        out.pre_bio_rates.push(BioRate::new(BioField::Stress, -0.02));
    }

    if contains_any(&lower, &["no food", "without food", "food unavailable"]) {
        set_allowed(out, Action::Eat, false);
    } else if contains_any(
        &lower,
        &["food available", "food is available", "has food", "meal nearby", "kitchen stocked"],
    ) {
        set_allowed(out, Action::Eat, true);
    }

    if contains_any(&lower, &["no water", "without water", "water unavailable"]) {
        set_allowed(out, Action::Hydrate, false);
    } else if contains_any(&lower, &["water available", "drinkable water"]) {
        set_allowed(out, Action::Hydrate, true);
    }

    if contains_any(&lower, &["no quiet space", "cannot rest", "rest impossible"]) {
        set_allowed(out, Action::Rest, false);
    } else if contains_any(&lower, &["quiet space available", "can rest", "safe resting place"]) {
        set_allowed(out, Action::Rest, true);
    }
}
