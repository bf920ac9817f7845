//! The bio engine: one full physiological tick.
//!
//! Order is fixed: Decay -> Interactions -> Noise -> Clamp -> Thresholds ->
//! Cascades -> Clamp -> timestamp. The engine owns its RNG exclusively, so a
//! seeded engine fed the same dt sequence replays the same trajectory.

use crate::decay::apply_decay;
use crate::interactions::apply_interactions;
use crate::noise::apply_noise;
use crate::thresholds::{apply_threshold_cascades, evaluate_thresholds, Severity, ThresholdEvent};
use anima_core::{clamp_all, BioState, Delta, EngineConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// What happened during one engine tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioTickResult {
    /// Interaction deltas, in rule order.
    pub deltas: Vec<Delta>,
    pub thresholds: Vec<ThresholdEvent>,
}

impl BioTickResult {
    pub fn has_critical(&self) -> bool {
        self.thresholds
            .iter()
            .any(|e| e.severity == Severity::Critical)
    }
}

pub struct Engine {
    config: EngineConfig,
    rng: ChaCha8Rng,
}

impl Engine {
    /// Engine with an entropy-seeded generator, or the configured seed if set.
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Deterministic engine. Overrides any seed in `config`.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Advance `state` by `dt` seconds. Every field is in range on return.
    pub fn tick(&mut self, state: &mut BioState, dt: f64) -> BioTickResult {
        let dt = if dt.is_finite() {
            dt
        } else {
            tracing::warn!(dt, "non-finite dt treated as zero");
            0.0
        };
        apply_decay(state, &self.config.decay, dt);
        let deltas = apply_interactions(state, dt);
        apply_noise(state, &mut self.rng, &self.config.noise, dt);
        clamp_all(state);

        let thresholds = evaluate_thresholds(state, &self.config.thresholds, dt);
        apply_threshold_cascades(state, &thresholds);
        clamp_all(state);
        state.touch();

        for event in thresholds.iter().filter(|e| e.severity == Severity::Critical) {
            tracing::info!(
                variable = %event.variable,
                description = %event.description,
                "critical threshold crossed"
            );
        }
        tracing::debug!(
            dt,
            interactions = deltas.len(),
            thresholds = thresholds.len(),
            energy = state.energy,
            stress = state.stress,
            mood = state.mood,
            "bio tick"
        );

        BioTickResult { deltas, thresholds }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish_non_exhaustive()
    }
}
