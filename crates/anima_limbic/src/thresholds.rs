//! Tiered threshold ladders with cascading effects.
//!
//! Each ladder is listed most-severe-first; evaluation stops at the first
//! matching tier so a variable reports at most one event per side per tick.

use anima_core::{BioField, BioState, Delta, ThresholdConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Mild => "mild",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// A threshold crossing detected during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEvent {
    pub variable: BioField,
    pub severity: Severity,
    pub description: String,
    /// Already scaled by dt where the tier is time-based.
    pub cascade: Vec<Delta>,
}

#[derive(Clone, Copy)]
enum Side {
    Below,
    Above,
}

#[derive(Clone, Copy)]
enum Scaling {
    /// Fixed one-shot magnitude per tick in the zone.
    Absolute,
    /// Magnitude multiplied by dt.
    PerSecond,
}

struct Tier {
    severity: Severity,
    limit: f64,
    description: &'static str,
    cascade: &'static [(BioField, f64)],
}

struct Ladder {
    variable: BioField,
    side: Side,
    scaling: Scaling,
    tiers: [Tier; 3],
}

impl Ladder {
    fn crossed(&self, value: f64, limit: f64) -> bool {
        match self.side {
            Side::Below => value < limit,
            Side::Above => value > limit,
        }
    }

    fn evaluate(&self, state: &BioState, dt: f64) -> Option<ThresholdEvent> {
        let value = state.get(self.variable);
        let tier = self.tiers.iter().find(|t| self.crossed(value, t.limit))?;
        let scale = match self.scaling {
            Scaling::Absolute => 1.0,
            Scaling::PerSecond => dt,
        };
        Some(ThresholdEvent {
            variable: self.variable,
            severity: tier.severity,
            description: format!("{} ({}={:.3})", tier.description, self.variable, value),
            cascade: tier
                .cascade
                .iter()
                .map(|&(field, amount)| Delta::new(field, amount * scale))
                .collect(),
        })
    }
}

use BioField::*;

static LADDERS: [Ladder; 5] = [
    Ladder {
        variable: BodyTemp,
        side: Side::Below,
        scaling: Scaling::Absolute,
        tiers: [
            Tier {
                severity: Severity::Critical,
                limit: 33.0,
                description: "severe hypothermia",
                cascade: &[(Stress, 0.3), (CognitiveCapacity, -0.4)],
            },
            Tier {
                severity: Severity::Warning,
                limit: 34.0,
                description: "moderate hypothermia",
                cascade: &[(PhysicalTension, 0.3), (CognitiveCapacity, -0.2)],
            },
            Tier {
                severity: Severity::Mild,
                limit: 35.0,
                description: "mild hypothermia",
                cascade: &[(PhysicalTension, 0.2)],
            },
        ],
    },
    Ladder {
        variable: BodyTemp,
        side: Side::Above,
        scaling: Scaling::Absolute,
        tiers: [
            Tier {
                severity: Severity::Critical,
                limit: 40.5,
                description: "hyperthermia",
                cascade: &[(Stress, 0.4), (CognitiveCapacity, -0.3)],
            },
            Tier {
                severity: Severity::Warning,
                limit: 39.5,
                description: "high fever",
                cascade: &[(Stress, 0.2), (Mood, -0.2)],
            },
            Tier {
                severity: Severity::Mild,
                limit: 38.5,
                description: "fever",
                cascade: &[(Stress, 0.1), (CognitiveCapacity, -0.1)],
            },
        ],
    },
    Ladder {
        variable: Stress,
        side: Side::Above,
        scaling: Scaling::PerSecond,
        tiers: [
            Tier {
                severity: Severity::Critical,
                limit: 0.95,
                description: "panic",
                cascade: &[(Mood, -0.03), (Energy, -0.02)],
            },
            Tier {
                severity: Severity::Warning,
                limit: 0.85,
                description: "overwhelmed",
                cascade: &[(CognitiveCapacity, -0.02), (Mood, -0.01)],
            },
            Tier {
                severity: Severity::Mild,
                limit: 0.7,
                description: "tense",
                cascade: &[(PhysicalTension, 0.01)],
            },
        ],
    },
    Ladder {
        variable: Energy,
        side: Side::Below,
        scaling: Scaling::PerSecond,
        tiers: [
            Tier {
                severity: Severity::Critical,
                limit: 0.05,
                description: "collapse",
                cascade: &[(Stress, 0.03), (CognitiveCapacity, -0.03)],
            },
            Tier {
                severity: Severity::Warning,
                limit: 0.15,
                description: "exhausted",
                cascade: &[(Mood, -0.01), (Stress, 0.01)],
            },
            Tier {
                severity: Severity::Mild,
                limit: 0.3,
                description: "tired",
                cascade: &[(CognitiveCapacity, -0.01)],
            },
        ],
    },
    Ladder {
        variable: Hunger,
        side: Side::Above,
        scaling: Scaling::PerSecond,
        tiers: [
            Tier {
                severity: Severity::Critical,
                limit: 0.95,
                description: "starving",
                cascade: &[(Stress, 0.02), (Energy, -0.01)],
            },
            Tier {
                severity: Severity::Warning,
                limit: 0.85,
                description: "very hungry",
                cascade: &[(CognitiveCapacity, -0.01), (Stress, 0.005)],
            },
            Tier {
                severity: Severity::Mild,
                limit: 0.7,
                description: "hungry",
                cascade: &[(Mood, -0.005)],
            },
        ],
    },
];

/// Evaluate every ladder against `state`. Pure: no mutation.
///
/// `cfg.terminal_states_enabled` is accepted but currently has no effect.
pub fn evaluate_thresholds(state: &BioState, _cfg: &ThresholdConfig, dt: f64) -> Vec<ThresholdEvent> {
    let dt = dt.max(0.0);
    LADDERS
        .iter()
        .filter_map(|ladder| ladder.evaluate(state, dt))
        .collect()
}

/// Apply every cascade delta of every event, in event order. Does not clamp.
pub fn apply_threshold_cascades(state: &mut BioState, events: &[ThresholdEvent]) {
    for delta in events.iter().flat_map(|e| e.cascade.iter()) {
        state.apply(*delta);
    }
}
