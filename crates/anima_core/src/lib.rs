//! # Anima Core
//!
//! Shared vocabulary of the simulation: the 8-variable biological state,
//! the delta/rate/pulse units that mutate it, the personality and chronic
//! pressure inputs, and the TOML configuration.

pub mod config;
pub mod persona;
pub mod state;

pub use config::{
    AnimaConfig, CooldownConfig, DecayConfig, EngineConfig, NoiseConfig, SimulationConfig,
    ThresholdConfig,
};
pub use persona::{ChronicState, Personality};
pub use state::{
    clamp, clamp_all, BioField, BioPulse, BioRate, BioState, Delta, FeedbackEnvelope,
    UnknownFieldError, VarRange, BODY_TEMP_BASELINE,
};
