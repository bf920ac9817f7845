//! The full simulation tick.
//!
//! Phases run strictly in sequence and none is re-entered:
//!
//! 1. drain pending input
//! 2. commit pre-bio effects (operator actions, environment) immediately
//! 3. bio engine tick
//! 4. drive urgencies
//! 5. prompt context
//! 6. one mind response
//! 7. parse with fallback, perceived motivation
//! 8. action resolution against the allow table and cooldowns
//! 9. emotional and action pulses committed at tick end

use crate::collaborators::{BioEngine, InputDrainer, MindRequest, MindResponder, MotivationComputer, TickInput};
use anima_core::{AnimaConfig, BioState, ChronicState, Personality};
use anima_limbic::{apply_feedback, BioTickResult, TickFeedbackBuffer};
use anima_mind::consciousness::{
    action_pulse, build_prompt_context, build_prompt_context_with_continuity, emotional_pulse,
    parse_response, perceived_motivation, resolve_action_with_cooldown, select_spontaneous_thought,
    ActionCooldownState, ActionCooldowns, ActionOutcome, ContinuityBuffer, ParsedResponse,
    PromptContext, Thought, TickSchedule,
};
use anima_mind::MotivationState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("simulation loop requires a {0} collaborator")]
    MissingCollaborator(&'static str),
}

/// Everything carried from one tick to the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub bio: BioState,
    pub personality: Personality,
    pub chronic: ChronicState,
    pub prior_parsed: ParsedResponse,
    pub cooldown_state: ActionCooldownState,
    /// Recent thoughts fed back into the prompt. `None` disables continuity.
    pub continuity: Option<ContinuityBuffer>,
    /// Completed tick count.
    pub tick: u64,
}

impl SimulationState {
    pub fn from_config(config: &AnimaConfig) -> Self {
        let capacity = config.simulation.continuity_capacity;
        Self {
            personality: config.personality,
            chronic: config.chronic,
            continuity: (capacity > 0).then(|| ContinuityBuffer::new(capacity)),
            ..Self::default()
        }
    }
}

/// One fully orchestrated tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTickResult {
    pub tick: u64,
    pub input: TickInput,
    pub bio: BioTickResult,
    pub motivation: MotivationState,
    pub perceived_motivation: MotivationState,
    pub prompt: PromptContext,
    pub raw: String,
    pub parsed: ParsedResponse,
    pub action_outcome: ActionOutcome,
    /// Spontaneous thought surfaced this tick, if the schedule was due.
    pub thought: Option<Thought>,
}

pub struct SimulationLoop {
    input: Box<dyn InputDrainer>,
    biology: Box<dyn BioEngine>,
    motivation: Box<dyn MotivationComputer>,
    mind: Box<dyn MindResponder>,
    cooldowns: ActionCooldowns,
    thought_schedule: TickSchedule,
}

impl SimulationLoop {
    pub fn builder() -> SimulationLoopBuilder {
        SimulationLoopBuilder::default()
    }

    /// Advance the whole simulation by `dt` seconds.
    pub fn tick(&mut self, state: &mut SimulationState, dt: f64) -> SimulationTickResult {
        state.tick += 1;

        // 1-2. Input, with pre-bio effects committed before the body moves.
        let input = self.input.drain();
        if input.has_pre_bio_effects() {
            apply_feedback(&mut state.bio, dt, &input.pre_bio_envelope());
        }

        // 3. Body.
        let bio = self.biology.tick(&mut state.bio, dt);

        // 4-5. Drives and what the mind is told about them.
        let motivation = self
            .motivation
            .compute(&state.bio, &state.personality, &state.chronic);
        let prompt = match &state.continuity {
            Some(buffer) => build_prompt_context_with_continuity(&motivation, &buffer.items()),
            None => build_prompt_context(&motivation),
        };

        // 6. Mind.
        let request = MindRequest {
            bio: state.bio.clone(),
            motivation,
            prompt,
            input,
            prior_parsed: state.prior_parsed.clone(),
        };
        let raw = self.mind.respond(&request);
        let MindRequest { prompt, input, .. } = request;

        // 7. Parse.
        let parsed = parse_response(&raw, &state.prior_parsed);
        let perceived = perceived_motivation(&motivation, &parsed);

        // 8. Action.
        let (action_outcome, next_cooldowns) = resolve_action_with_cooldown(
            &parsed.action,
            input.is_allowed(&parsed.action),
            input.now_seconds,
            &self.cooldowns,
            &state.cooldown_state,
        );

        // 9. Feedback.
        let mut feedback = TickFeedbackBuffer::new();
        feedback.add_pulses(emotional_pulse(&parsed.state));
        feedback.add_pulses(action_pulse(&action_outcome));
        feedback.commit_at_tick_end(&mut state.bio, dt);

        state.prior_parsed = parsed.clone();
        state.cooldown_state = next_cooldowns;

        let thought = select_spontaneous_thought(&perceived, self.thought_schedule, state.tick);
        if let Some(buffer) = state.continuity.as_mut() {
            if !parsed.narrative.is_empty() {
                buffer.add(Thought::narrative(parsed.narrative.clone()));
            }
            if let Some(t) = &thought {
                buffer.add(t.clone());
            }
        }

        tracing::debug!(
            tick = state.tick,
            goal = %motivation.active_goal,
            action = %action_outcome.action,
            satisfied = action_outcome.satisfied,
            thresholds = bio.thresholds.len(),
            "simulation tick"
        );

        SimulationTickResult {
            tick: state.tick,
            input,
            bio,
            motivation,
            perceived_motivation: perceived,
            prompt,
            raw,
            parsed,
            action_outcome,
            thought,
        }
    }
}

/// Collects the collaborators; `build` fails if any required one is missing.
#[derive(Default)]
pub struct SimulationLoopBuilder {
    input: Option<Box<dyn InputDrainer>>,
    biology: Option<Box<dyn BioEngine>>,
    motivation: Option<Box<dyn MotivationComputer>>,
    mind: Option<Box<dyn MindResponder>>,
    cooldowns: ActionCooldowns,
    thought_schedule: TickSchedule,
}

impl SimulationLoopBuilder {
    pub fn input(mut self, input: impl InputDrainer + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn biology(mut self, engine: impl BioEngine + 'static) -> Self {
        self.biology = Some(Box::new(engine));
        self
    }

    pub fn motivation(mut self, motivation: impl MotivationComputer + 'static) -> Self {
        self.motivation = Some(Box::new(motivation));
        self
    }

    pub fn mind(mut self, mind: impl MindResponder + 'static) -> Self {
        self.mind = Some(Box::new(mind));
        self
    }

    pub fn cooldowns(mut self, cooldowns: ActionCooldowns) -> Self {
        self.cooldowns = cooldowns;
        self
    }

    pub fn thought_schedule(mut self, schedule: TickSchedule) -> Self {
        self.thought_schedule = schedule;
        self
    }

    /// Cooldowns and thought schedule from config.
    pub fn configure(self, config: &AnimaConfig) -> Self {
        self.cooldowns(config.cooldowns.0.clone())
            .thought_schedule(TickSchedule {
                every_ticks: u64::from(config.simulation.thought_every_ticks),
            })
    }

    pub fn build(self) -> Result<SimulationLoop, SetupError> {
        Ok(SimulationLoop {
            input: self.input.ok_or(SetupError::MissingCollaborator("input"))?,
            biology: self.biology.ok_or(SetupError::MissingCollaborator("biology"))?,
            motivation: self
                .motivation
                .ok_or(SetupError::MissingCollaborator("motivation"))?,
            mind: self.mind.ok_or(SetupError::MissingCollaborator("mind"))?,
            cooldowns: self.cooldowns,
            thought_schedule: self.thought_schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputAdapter;
    use crate::responder::ScriptedMind;
    use crate::sense::ConventionParser;
    use anima_limbic::Engine;
    use anima_mind::DefaultMotivation;

    #[test]
    fn test_missing_collaborator_is_reported() {
        let err = SimulationLoop::builder()
            .input(InputAdapter::default())
            .biology(Engine::with_seed(Default::default(), 1))
            .mind(ScriptedMind::default())
            .build()
            .err();
        assert_eq!(err, Some(SetupError::MissingCollaborator("motivation")));
        assert_eq!(
            SetupError::MissingCollaborator("mind").to_string(),
            "simulation loop requires a mind collaborator"
        );
    }

    #[test]
    fn test_state_from_config() {
        let mut config = AnimaConfig::default();
        config.personality.curiosity = 0.9;
        let state = SimulationState::from_config(&config);
        assert_eq!(state.personality.curiosity, 0.9);
        assert_eq!(state.continuity.as_ref().map(|c| c.capacity()), Some(5));

        config.simulation.continuity_capacity = 0;
        assert!(SimulationState::from_config(&config).continuity.is_none());
    }

    #[test]
    fn test_tick_counts_and_records_narrative() {
        let mut sim = SimulationLoop::builder()
            .input(InputAdapter::with_clock(ConventionParser, || 100))
            .biology(Engine::with_seed(Default::default(), 2))
            .motivation(DefaultMotivation)
            .mind(ScriptedMind::new([
                "steady\n[STATE: arousal=0, valence=0]\n[ACTION: journal]",
            ]))
            .build()
            .unwrap();
        let mut state = SimulationState::from_config(&AnimaConfig::default());

        let first = sim.tick(&mut state, 1.0);
        let second = sim.tick(&mut state, 1.0);
        assert_eq!((first.tick, second.tick), (1, 2));
        assert_eq!(second.prompt.continuity, vec!["steady"]);
        assert!(second.action_outcome.satisfied);
        assert!(state.bio.in_range());
    }
}
