//! Interaction rules between bio variables.
//!
//! An ordered static table of (condition, effect) pairs. All conditions and
//! state-dependent magnitudes read one snapshot taken before the first rule
//! fires, so rule A's output can never trigger rule B within the same call.
//! The effect still lands on the live state immediately and shows up in the
//! next tick's evaluation.

use anima_core::{BioField, BioState, Delta};

/// One data-driven interaction rule. Magnitudes are per second.
pub struct InteractionRule {
    pub name: &'static str,
    pub condition: fn(&BioState) -> bool,
    pub effect: fn(&BioState, f64) -> Delta,
}

use BioField::*;

/// The complete set of 22 interaction rules, in evaluation order.
pub static INTERACTION_RULES: &[InteractionRule] = &[
    // === Stress ===
    InteractionRule {
        name: "stress->physical_tension: high stress tightens muscles",
        condition: |s| s.stress > 0.6,
        effect: |s, dt| Delta::new(PhysicalTension, s.stress * 0.3 * dt),
    },
    InteractionRule {
        name: "stress->cognitive_capacity: stress depletes mental capacity",
        condition: |s| s.stress > 0.5,
        effect: |s, dt| Delta::new(CognitiveCapacity, -s.stress * 0.2 * dt),
    },
    InteractionRule {
        name: "stress->mood: severe stress dampens mood",
        condition: |s| s.stress > 0.7,
        effect: |_, dt| Delta::new(Mood, -0.002 * dt),
    },
    // === Hunger ===
    InteractionRule {
        name: "hunger->stress: severe hunger raises stress",
        condition: |s| s.hunger > 0.7,
        effect: |_, dt| Delta::new(Stress, 0.001 * dt),
    },
    InteractionRule {
        name: "hunger->cognitive_capacity: extreme hunger depletes cognition",
        condition: |s| s.hunger > 0.8,
        effect: |_, dt| Delta::new(CognitiveCapacity, -0.002 * dt),
    },
    // === Energy ===
    InteractionRule {
        name: "energy->mood: low energy worsens mood",
        condition: |s| s.energy < 0.3,
        effect: |_, dt| Delta::new(Mood, -0.001 * dt),
    },
    InteractionRule {
        name: "energy->stress: very low energy raises stress",
        condition: |s| s.energy < 0.2,
        effect: |_, dt| Delta::new(Stress, 0.002 * dt),
    },
    InteractionRule {
        name: "energy->cognitive_capacity: very low energy depletes cognition",
        condition: |s| s.energy < 0.2,
        effect: |_, dt| Delta::new(CognitiveCapacity, -0.002 * dt),
    },
    // === Physical tension ===
    InteractionRule {
        name: "physical_tension->stress: high tension feeds back to stress",
        condition: |s| s.physical_tension > 0.7,
        effect: |_, dt| Delta::new(Stress, 0.001 * dt),
    },
    InteractionRule {
        name: "physical_tension->mood: elevated tension dampens mood",
        condition: |s| s.physical_tension > 0.6,
        effect: |_, dt| Delta::new(Mood, -0.001 * dt),
    },
    // === Cognitive capacity (low capacity = high load) ===
    InteractionRule {
        name: "cognitive_capacity->stress: severe depletion raises stress",
        condition: |s| s.cognitive_capacity < 0.2,
        effect: |_, dt| Delta::new(Stress, 0.002 * dt),
    },
    InteractionRule {
        name: "cognitive_capacity->mood: depleted cognition lowers mood",
        condition: |s| s.cognitive_capacity < 0.3,
        effect: |_, dt| Delta::new(Mood, -0.001 * dt),
    },
    // === Mood ===
    InteractionRule {
        name: "mood->stress: dysphoria elevates stress",
        condition: |s| s.mood < 0.2,
        effect: |_, dt| Delta::new(Stress, 0.001 * dt),
    },
    InteractionRule {
        name: "mood->social_deficit: dysphoria deepens isolation",
        condition: |s| s.mood < 0.2,
        effect: |_, dt| Delta::new(SocialDeficit, 0.001 * dt),
    },
    // === Social deficit ===
    InteractionRule {
        name: "social_deficit->mood: high isolation lowers mood",
        condition: |s| s.social_deficit > 0.7,
        effect: |_, dt| Delta::new(Mood, -0.001 * dt),
    },
    InteractionRule {
        name: "social_deficit->stress: extreme isolation raises stress",
        condition: |s| s.social_deficit > 0.8,
        effect: |_, dt| Delta::new(Stress, 0.001 * dt),
    },
    // === Body temperature: hypothermia ===
    InteractionRule {
        name: "body_temp->stress: hypothermia raises stress",
        condition: |s| s.body_temp < 35.5,
        effect: |s, dt| Delta::new(Stress, (35.5 - s.body_temp) * 0.01 * dt),
    },
    InteractionRule {
        name: "body_temp->physical_tension: hypothermia causes shivering",
        condition: |s| s.body_temp < 35.5,
        effect: |s, dt| Delta::new(PhysicalTension, (35.5 - s.body_temp) * 0.05 * dt),
    },
    // === Body temperature: hyperthermia ===
    InteractionRule {
        name: "body_temp->stress: hyperthermia raises stress",
        condition: |s| s.body_temp > 38.5,
        effect: |s, dt| Delta::new(Stress, (s.body_temp - 38.5) * 0.01 * dt),
    },
    InteractionRule {
        name: "body_temp->cognitive_capacity: hyperthermia depletes cognition",
        condition: |s| s.body_temp > 38.5,
        effect: |s, dt| Delta::new(CognitiveCapacity, -(s.body_temp - 38.5) * 0.03 * dt),
    },
    // === Compound spirals ===
    InteractionRule {
        name: "energy+hunger->mood: low energy AND high hunger collapses mood faster",
        condition: |s| s.energy < 0.4 && s.hunger > 0.6,
        effect: |_, dt| Delta::new(Mood, -0.002 * dt),
    },
    InteractionRule {
        name: "stress+cognitive_capacity->mood: overwhelmed-depleted spiral crushes mood",
        condition: |s| s.stress > 0.8 && s.cognitive_capacity < 0.3,
        effect: |_, dt| Delta::new(Mood, -0.003 * dt),
    },
];

/// Evaluate every rule against a pre-call snapshot and apply the fired deltas
/// to `state` cumulatively, in table order. Returns what was applied.
/// Does not clamp.
pub fn apply_interactions(state: &mut BioState, dt: f64) -> Vec<Delta> {
    let dt = dt.max(0.0);
    let snapshot = state.clone();
    let mut deltas = Vec::new();

    for rule in INTERACTION_RULES {
        if !(rule.condition)(&snapshot) {
            continue;
        }
        let delta = (rule.effect)(&snapshot, dt);
        tracing::trace!(rule = rule.name, amount = delta.amount, "interaction fired");
        state.apply(delta);
        deltas.push(delta);
    }

    deltas
}
