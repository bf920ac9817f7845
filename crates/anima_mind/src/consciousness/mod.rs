//! The conscious layer: what the mind is told, and what its answer does.

pub mod actions;
pub mod continuity;
pub mod drive_overrides;
pub mod parsing;
pub mod prompt_context;
pub mod thought_selection;
mod types;

pub use actions::{action_pulse, emotional_pulse, resolve_action_outcome, resolve_action_with_cooldown};
pub use continuity::ContinuityBuffer;
pub use drive_overrides::{apply_drive_overrides, perceived_motivation};
pub use parsing::{parse_response, strip_tags};
pub use prompt_context::{build_prompt_context, build_prompt_context_with_continuity};
pub use thought_selection::select_spontaneous_thought;
pub use types::{
    ActionCooldownState, ActionCooldowns, ActionOutcome, ParsedResponse, ParsedState,
    PromptContext, PromptDrive, Thought, ThoughtCategory, TickSchedule,
};
