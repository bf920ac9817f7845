use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::persona::{ChronicState, Personality};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnimaConfig {
    pub engine: EngineConfig,
    pub simulation: SimulationConfig,
    pub personality: Personality,
    pub chronic: ChronicState,
    /// Per-action cooldown in wall-clock seconds, keyed by action name.
    pub cooldowns: CooldownConfig,
}

impl AnimaConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: AnimaConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ANIMA_DECAY_MULTIPLIER") {
            if let Ok(n) = v.parse() {
                self.engine.decay.multiplier = n;
            }
        }
        if let Ok(v) = std::env::var("ANIMA_NOISE_SIGMA") {
            if let Ok(n) = v.parse() {
                self.engine.noise.sigma = n;
            }
        }
        if let Ok(v) = std::env::var("ANIMA_SEED") {
            if let Ok(n) = v.parse() {
                self.engine.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("ANIMA_DT_SECONDS") {
            if let Ok(n) = v.parse() {
                self.simulation.dt_seconds = n;
            }
        }
        if let Ok(v) = std::env::var("ANIMA_TICK_INTERVAL_MS") {
            if let Ok(n) = v.parse() {
                self.simulation.tick_interval_ms = n;
            }
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Bio engine configuration: the `[engine]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub decay: DecayConfig,
    pub noise: NoiseConfig,
    pub thresholds: ThresholdConfig,
    /// Fixed RNG seed. None = seed from OS entropy.
    pub seed: Option<u64>,
}

/// Autonomous decay speed.
///
/// multiplier = 1.0 is real time; the default 5.0 makes degradation visible
/// within about a minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub multiplier: f64,
    /// Reserved. No variable auto-returns to baseline.
    pub homeostasis_enabled: bool,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            multiplier: 5.0,
            homeostasis_enabled: false,
        }
    }
}

/// Gaussian jitter. `sigma` is the per-second standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub sigma: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { sigma: 0.002 }
    }
}

/// Threshold behavior.
///
/// `terminal_states_enabled` is reserved for capping cascade magnitudes;
/// it has no effect and detection is never suppressed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub terminal_states_enabled: bool,
}

// ============================================================================
// Simulation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds per tick.
    pub dt_seconds: f64,
    /// Wall-clock pause between ticks in the CLI driver.
    pub tick_interval_ms: u64,
    /// Narrative lines kept for prompt continuity. 0 disables the log.
    pub continuity_capacity: usize,
    /// Emit a spontaneous thought every N ticks. 0 disables.
    pub thought_every_ticks: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt_seconds: 1.0,
            tick_interval_ms: 1000,
            continuity_capacity: 5,
            thought_every_ticks: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CooldownConfig(pub HashMap<String, i64>);

impl Default for CooldownConfig {
    fn default() -> Self {
        Self(HashMap::from([
            ("eat".to_string(), 60),
            ("rest".to_string(), 120),
            ("reach_out".to_string(), 45),
            ("hydrate".to_string(), 30),
        ]))
    }
}

// ============================================================================
// Tests
// ============================================================================
