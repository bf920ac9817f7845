//! Bio effects of what the mind feels and does.
//!
//! Both emotional and action effects are one-shot pulses: callers must commit
//! them as absolute amounts, never scaled by dt.

use super::types::{ActionCooldownState, ActionCooldowns, ActionOutcome, ParsedState};
use crate::motivation::Action;
use anima_core::{clamp, BioField, BioPulse};

fn clamp_signed(v: f64) -> f64 {
    clamp(v, -1.0, 1.0)
}

/// Pulses from self-reported arousal and valence.
pub fn emotional_pulse(state: &ParsedState) -> Vec<BioPulse> {
    let arousal = clamp_signed(state.arousal);
    let valence = clamp_signed(state.valence);

    vec![
        BioPulse::new(BioField::Stress, 0.12 * arousal - 0.08 * valence),
        BioPulse::new(BioField::Mood, 0.16 * valence - 0.05 * arousal),
        BioPulse::new(BioField::PhysicalTension, 0.10 * arousal.max(0.0)),
        BioPulse::new(
            BioField::CognitiveCapacity,
            -0.06 * arousal.max(0.0) + 0.04 * valence.max(0.0),
        ),
    ]
}

/// Pulses for a resolved action. Blocked or failed actions and unknown
/// action names produce nothing.
pub fn action_pulse(outcome: &ActionOutcome) -> Vec<BioPulse> {
    if !outcome.executed || !outcome.satisfied {
        return Vec::new();
    }
    let Ok(action) = outcome.action.parse::<Action>() else {
        return Vec::new();
    };

    use BioField::*;
    let pulses: &[(BioField, f64)] = match action {
        Action::Eat => &[(Hunger, -0.30), (Energy, 0.08), (Mood, 0.04)],
        Action::Hydrate => &[(Stress, -0.03), (Mood, 0.01)],
        Action::Rest => &[(Energy, 0.18), (Stress, -0.06), (PhysicalTension, -0.08)],
        Action::ReachOut => &[(SocialDeficit, -0.20), (Mood, 0.06)],
        Action::Journal => &[(Stress, -0.02), (Mood, 0.03)],
        Action::Breathe => &[(Stress, -0.08), (PhysicalTension, -0.10)],
        Action::ScanArea => &[(Stress, -0.04)],
        Action::SeekWarmth => &[(BodyTemp, 0.60), (Stress, -0.02)],
        Action::SeekCooling => &[(BodyTemp, -0.60), (Stress, -0.02)],
        Action::MicroTask => &[(CognitiveCapacity, 0.04), (Mood, 0.02), (Energy, -0.02)],
    };
    pulses
        .iter()
        .map(|&(field, amount)| BioPulse::new(field, amount))
        .collect()
}

fn normalize_action(action: &str) -> String {
    action.trim().to_ascii_lowercase()
}

/// Resolve against the environment only.
pub fn resolve_action_outcome(action: &str, allowed: bool) -> ActionOutcome {
    ActionOutcome {
        action: normalize_action(action),
        executed: allowed,
        satisfied: allowed,
    }
}

/// Resolve against the environment and per-action cooldowns.
///
/// Blocked and still-cooling actions are unsatisfied and leave the cooldown
/// state untouched. A satisfied action starts its cooldown when one is
/// configured with a positive length.
pub fn resolve_action_with_cooldown(
    action: &str,
    allowed: bool,
    now_seconds: i64,
    cooldowns: &ActionCooldowns,
    state: &ActionCooldownState,
) -> (ActionOutcome, ActionCooldownState) {
    let action = normalize_action(action);
    let mut next = state.clone();
    let rejected = |action: String| ActionOutcome {
        action,
        executed: false,
        satisfied: false,
    };

    if !allowed {
        return (rejected(action), next);
    }
    let cooling_until = next.get(&action).copied().filter(|&until| now_seconds < until);
    if let Some(until) = cooling_until {
        tracing::debug!(%action, until, now_seconds, "action cooling down");
        return (rejected(action), next);
    }

    if let Some(&duration) = cooldowns.get(&action) {
        if duration > 0 {
            next.insert(action.clone(), now_seconds.saturating_add(duration));
        }
    }

    (
        ActionOutcome {
            action,
            executed: true,
            satisfied: true,
        },
        next,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(pulses: &[BioPulse], field: BioField) -> f64 {
        pulses
            .iter()
            .filter(|p| p.field == field)
            .map(|p| p.amount)
            .sum()
    }

    #[test]
    fn test_emotional_pulse_formula() {
        let p = emotional_pulse(&ParsedState {
            arousal: 0.5,
            valence: -0.5,
        });
        assert!((amount(&p, BioField::Stress) - (0.06 + 0.04)).abs() < 1e-12);
        assert!((amount(&p, BioField::Mood) - (-0.08 - 0.025)).abs() < 1e-12);
        assert!((amount(&p, BioField::PhysicalTension) - 0.05).abs() < 1e-12);
        assert!((amount(&p, BioField::CognitiveCapacity) - (-0.03)).abs() < 1e-12);
    }

    #[test]
    fn test_emotional_pulse_clamps_inputs() {
        let wild = emotional_pulse(&ParsedState {
            arousal: 10.0,
            valence: -10.0,
        });
        let edge = emotional_pulse(&ParsedState {
            arousal: 1.0,
            valence: -1.0,
        });
        assert_eq!(wild, edge);
    }

    #[test]
    fn test_negative_arousal_adds_no_tension() {
        let p = emotional_pulse(&ParsedState {
            arousal: -0.8,
            valence: 0.0,
        });
        assert_eq!(amount(&p, BioField::PhysicalTension), 0.0);
    }

    #[test]
    fn test_action_pulse_only_when_satisfied() {
        let blocked = ActionOutcome {
            action: "eat".into(),
            executed: false,
            satisfied: false,
        };
        assert!(action_pulse(&blocked).is_empty());

        let eaten = resolve_action_outcome(" EAT ", true);
        let p = action_pulse(&eaten);
        assert_eq!(amount(&p, BioField::Hunger), -0.30);
        assert_eq!(amount(&p, BioField::Energy), 0.08);
    }

    #[test]
    fn test_unknown_action_has_no_pulse() {
        assert!(action_pulse(&resolve_action_outcome("dance", true)).is_empty());
    }

    #[test]
    fn test_cooldown_blocks_until_expiry() {
        let cooldowns = ActionCooldowns::from([("eat".to_string(), 60)]);
        let (first, state) =
            resolve_action_with_cooldown("eat", true, 1000, &cooldowns, &ActionCooldownState::new());
        assert!(first.satisfied);
        assert_eq!(state.get("eat"), Some(&1060));

        let (second, state2) = resolve_action_with_cooldown("eat", true, 1030, &cooldowns, &state);
        assert!(!second.satisfied && !second.executed);
        assert_eq!(state2, state);

        let (third, state3) = resolve_action_with_cooldown("eat", true, 1060, &cooldowns, &state2);
        assert!(third.satisfied);
        assert_eq!(state3.get("eat"), Some(&1120));
    }

    #[test]
    fn test_huge_cooldown_saturates() {
        let cooldowns = ActionCooldowns::from([("eat".to_string(), i64::MAX)]);
        let (out, state) = resolve_action_with_cooldown(
            "eat",
            true,
            1_700_000_000,
            &cooldowns,
            &ActionCooldownState::new(),
        );
        assert!(out.satisfied);
        assert_eq!(state.get("eat"), Some(&i64::MAX));

        let (again, _) = resolve_action_with_cooldown("eat", true, i64::MAX - 1, &cooldowns, &state);
        assert!(!again.satisfied);
    }

    #[test]
    fn test_blocked_action_leaves_cooldowns_untouched() {
        let cooldowns = ActionCooldowns::from([("rest".to_string(), 120)]);
        let (out, state) =
            resolve_action_with_cooldown("rest", false, 5, &cooldowns, &ActionCooldownState::new());
        assert!(!out.executed);
        assert!(state.is_empty());
    }

    #[test]
    fn test_action_without_cooldown_never_cools() {
        let (out, state) = resolve_action_with_cooldown(
            "journal",
            true,
            5,
            &ActionCooldowns::new(),
            &ActionCooldownState::new(),
        );
        assert!(out.satisfied);
        assert!(state.is_empty());
    }
}
