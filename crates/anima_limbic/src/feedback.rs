//! Tick-scoped feedback accumulation.
//!
//! Emotional reactions and action effects arrive while a tick is still being
//! processed. They are collected here and committed in one step at tick end,
//! so nothing downstream ever observes a half-applied tick.

use anima_core::{clamp_all, BioPulse, BioRate, BioState, FeedbackEnvelope};

/// Apply an envelope to `state`: rates scaled by `dt`, then pulses as-is,
/// then clamp. Negative dt counts as zero for rates.
pub fn apply_feedback(state: &mut BioState, dt: f64, envelope: &FeedbackEnvelope) {
    let dt = dt.max(0.0);
    for rate in &envelope.rates {
        *state.field_mut(rate.field) += rate.per_second * dt;
    }
    for pulse in &envelope.pulses {
        *state.field_mut(pulse.field) += pulse.amount;
    }
    clamp_all(state);
}

/// Accumulates rates and pulses without touching state until commit.
#[derive(Debug, Default)]
pub struct TickFeedbackBuffer {
    pending: FeedbackEnvelope,
}

impl TickFeedbackBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rates(&mut self, rates: impl IntoIterator<Item = BioRate>) {
        self.pending.rates.extend(rates);
    }

    pub fn add_pulses(&mut self, pulses: impl IntoIterator<Item = BioPulse>) {
        self.pending.pulses.extend(pulses);
    }

    pub fn add_envelope(&mut self, envelope: FeedbackEnvelope) {
        self.add_rates(envelope.rates);
        self.add_pulses(envelope.pulses);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Commit everything accumulated so far and reset the buffer.
    pub fn commit_at_tick_end(&mut self, state: &mut BioState, dt: f64) {
        let envelope = std::mem::take(&mut self.pending);
        tracing::trace!(
            rates = envelope.rates.len(),
            pulses = envelope.pulses.len(),
            "committing tick feedback"
        );
        apply_feedback(state, dt, &envelope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anima_core::BioField;

    #[test]
    fn test_adds_do_not_touch_state() {
        let state = BioState::default();
        let before = state.clone();
        let mut buf = TickFeedbackBuffer::new();
        buf.add_rates([BioRate::new(BioField::Mood, 0.5)]);
        buf.add_pulses([BioPulse::new(BioField::Stress, 0.5)]);
        assert_eq!(state, before);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_commit_rates_then_pulses() {
        let mut state = BioState {
            mood: 0.30,
            ..BioState::default()
        };
        let mut buf = TickFeedbackBuffer::new();
        buf.add_rates([BioRate::new(BioField::Mood, 0.01)]);
        buf.add_pulses([BioPulse::new(BioField::Mood, 0.10)]);
        buf.commit_at_tick_end(&mut state, 10.0);
        assert!((state.mood - 0.50).abs() < 1e-12);
    }

    #[test]
    fn test_commit_resets_buffer() {
        let mut state = BioState::default();
        let mut buf = TickFeedbackBuffer::new();
        buf.add_pulses([BioPulse::new(BioField::Energy, -0.1)]);
        buf.commit_at_tick_end(&mut state, 1.0);
        assert!(buf.is_empty());

        let after_first = state.values();
        buf.commit_at_tick_end(&mut state, 1.0);
        assert_eq!(state.values(), after_first);
    }

    #[test]
    fn test_commit_clamps() {
        let mut state = BioState::default();
        let mut buf = TickFeedbackBuffer::new();
        buf.add_pulses([BioPulse::new(BioField::Hunger, 5.0)]);
        buf.commit_at_tick_end(&mut state, 1.0);
        assert_eq!(state.hunger, 1.0);
    }

    #[test]
    fn test_empty_commit_only_clamps() {
        let mut state = BioState {
            stress: 1.7,
            ..BioState::default()
        };
        TickFeedbackBuffer::new().commit_at_tick_end(&mut state, 1.0);
        assert_eq!(state.stress, 1.0);
        assert_eq!(state.mood, 0.5);
    }

    #[test]
    fn test_add_envelope_merges() {
        let mut buf = TickFeedbackBuffer::new();
        buf.add_envelope(FeedbackEnvelope {
            rates: vec![BioRate::new(BioField::BodyTemp, -0.03)],
            pulses: vec![BioPulse::new(BioField::Stress, 0.2)],
        });
        let mut state = BioState::default();
        buf.commit_at_tick_end(&mut state, 10.0);
        assert!((state.body_temp - 36.3).abs() < 1e-9);
        assert!((state.stress - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_rates_ignore_negative_dt() {
        let mut state = BioState::default();
        let env = FeedbackEnvelope {
            rates: vec![BioRate::new(BioField::Mood, 1.0)],
            pulses: vec![],
        };
        apply_feedback(&mut state, -5.0, &env);
        assert_eq!(state.mood, 0.5);
    }
}
