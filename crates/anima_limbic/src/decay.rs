//! Autonomous decay: the body runs down on its own.
//!
//! Only 5 of the 8 variables drift without a cause:
//! - energy → 0 (exhaustion)
//! - hunger → 1 (starvation)
//! - cognitive_capacity → 0 (mental depletion)
//! - mood → 0 (dysphoria)
//! - social_deficit → 1 (isolation)
//!
//! stress, physical_tension and body_temp only move through interactions,
//! thresholds or external feedback.

use anima_core::{BioState, DecayConfig};

/// Per-second rates at multiplier 1.0.
/// Calibrated for roughly a 20% move from baseline within 4-10 minutes.
const ENERGY_DECAY_RATE: f64 = 0.00067; // 0.8 → 0.6 in ~300s
const HUNGER_GROWTH_RATE: f64 = 0.00083; // 0.1 → 0.3 in ~240s
const COGNITIVE_DECAY_RATE: f64 = 0.00050; // 1.0 → 0.8 in ~400s
const MOOD_DECAY_RATE: f64 = 0.00033; // 0.5 → 0.3 in ~600s
const SOCIAL_GROWTH_RATE: f64 = 0.00033; // 0.0 → 0.2 in ~600s

/// Longest elapsed time a single decay step will honor.
/// A long real-world pause must not collapse the state in one tick.
pub const MAX_DECAY_DT: f64 = 60.0;

/// Apply linear decay for `dt` seconds. Does not clamp. NaN `dt` is a no-op.
pub fn apply_decay(state: &mut BioState, cfg: &DecayConfig, dt: f64) {
    if dt.is_nan() {
        return;
    }
    let dt = dt.clamp(0.0, MAX_DECAY_DT);
    let rate = cfg.multiplier * dt;

    state.energy -= ENERGY_DECAY_RATE * rate;
    state.hunger += HUNGER_GROWTH_RATE * rate;
    state.cognitive_capacity -= COGNITIVE_DECAY_RATE * rate;
    state.mood -= MOOD_DECAY_RATE * rate;
    state.social_deficit += SOCIAL_GROWTH_RATE * rate;
}
