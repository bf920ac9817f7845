//! # Anima Limbic System (System 1)
//!
//! The body of the simulated person. Each tick the state runs down on its
//! own, variables push on each other, a little noise keeps it alive, and
//! crossings of tiered thresholds trigger cascades.
//!
//! ## Pipeline
//!
//! 1. **Decay**: 5 variables drift linearly toward depletion
//! 2. **Interactions**: 22 rules evaluated against a pre-tick snapshot
//! 3. **Noise**: Gaussian jitter scaled by sqrt(dt)
//! 4. **Thresholds**: mild / warning / critical ladders with cascades
//!
//! External effects (emotion, actions, environment) never touch the state
//! directly; they go through [`TickFeedbackBuffer`] or [`apply_feedback`].

pub mod decay;
pub mod engine;
pub mod feedback;
pub mod interactions;
pub mod noise;
pub mod thresholds;

pub use decay::{apply_decay, MAX_DECAY_DT};
pub use engine::{BioTickResult, Engine};
pub use feedback::{apply_feedback, TickFeedbackBuffer};
pub use interactions::{apply_interactions, InteractionRule, INTERACTION_RULES};
pub use noise::apply_noise;
pub use thresholds::{apply_threshold_cascades, evaluate_thresholds, Severity, ThresholdEvent};
