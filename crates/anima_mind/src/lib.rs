//! # Anima Mind (System 2)
//!
//! Turns bodily state into motivation and motivation into a prompt, then
//! reads the mind's tagged answer back into bio effects.
//!
//! - [`motivation`]: five drive urgencies from bio, personality and chronic load
//! - [`consciousness`]: prompt context, response parsing, drive overrides,
//!   action resolution with cooldowns, emotional and action pulses,
//!   continuity and spontaneous thoughts

pub mod consciousness;
pub mod motivation;

pub use motivation::{
    action_candidates_for, compute, Action, ActionConstraints, DefaultMotivation, Drive,
    MotivationState,
};
