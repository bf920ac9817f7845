//! # Anima Sim
//!
//! Wires body and mind into one tick:
//!
//! - [`collaborators`]: the traits each stage is reached through
//! - [`input`] / [`sense`]: operator lines queued between ticks and classified on drain
//! - [`scenario`]: named environments re-applied on every drain
//! - [`simulation`]: the nine-phase tick and its builder
//! - [`responder`]: local minds that need no language model
//! - [`output`]: tagged summary lines for a terminal

pub mod collaborators;
pub mod input;
pub mod output;
pub mod responder;
pub mod scenario;
pub mod sense;
pub mod simulation;

pub use collaborators::{
    BioEngine, InputDrainer, MindRequest, MindResponder, MotivationComputer, TickInput,
};
pub use input::{default_allowed_actions, InputAdapter};
pub use output::{tick_lines, DEFAULT_DRIVE_THRESHOLD};
pub use responder::{AutopilotMind, ScriptedMind};
pub use scenario::{ScenarioError, ScenarioInjector, PRESETS};
pub use sense::{ConventionParser, InputKind, ParsedInput, SenseParser};
pub use simulation::{
    SetupError, SimulationLoop, SimulationLoopBuilder, SimulationState, SimulationTickResult,
};
