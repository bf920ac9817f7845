use crate::motivation::Drive;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One drive as it is presented to the mind: named, and described as felt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDrive {
    pub drive: Drive,
    pub felt: String,
}

/// Everything the mind is told about its own state this tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptContext {
    /// The two most urgent drives.
    pub primary: Vec<PromptDrive>,
    pub background: Vec<PromptDrive>,
    pub goal_pull: String,
    /// Recent thoughts, oldest first.
    pub continuity: Vec<String>,
}

impl PromptContext {
    /// Plain-text rendering, one section per block.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.primary.is_empty() {
            out.push_str("Foreground:\n");
            for d in &self.primary {
                out.push_str(&format!("- {}: {}\n", d.drive, d.felt));
            }
        }
        if !self.background.is_empty() {
            out.push_str("Background:\n");
            for d in &self.background {
                out.push_str(&format!("- {}: {}\n", d.drive, d.felt));
            }
        }
        if !self.goal_pull.is_empty() {
            out.push_str(&self.goal_pull);
            out.push('\n');
        }
        if !self.continuity.is_empty() {
            out.push_str("Recent thoughts:\n");
            for line in &self.continuity {
                out.push_str(&format!("- {}\n", line));
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThoughtCategory {
    /// Narrative text the mind produced in response to a tick.
    Narrative,
    /// A spontaneous thought pulled by the most urgent drive.
    Drive,
    /// A spontaneous thought with no urgent drive behind it.
    AssociativeDrift,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub category: ThoughtCategory,
    pub drive: Option<Drive>,
    pub text: String,
}

impl Thought {
    pub fn narrative(text: impl Into<String>) -> Self {
        Self {
            category: ThoughtCategory::Narrative,
            drive: None,
            text: text.into(),
        }
    }
}

/// Fires on every `every_ticks`-th tick. Zero disables it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSchedule {
    pub every_ticks: u64,
}

impl TickSchedule {
    pub fn due(&self, tick: u64) -> bool {
        self.every_ticks > 0 && tick > 0 && tick % self.every_ticks == 0
    }
}

/// Self-reported affect: arousal and valence, nominally in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedState {
    pub arousal: f64,
    pub valence: f64,
}

/// The structured reading of one raw mind response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub state: ParsedState,
    /// Lowercased action name. May be outside the known action set.
    pub action: String,
    pub drive_overrides: BTreeMap<Drive, f64>,
    pub narrative: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: String,
    pub executed: bool,
    pub satisfied: bool,
}

/// Cooldown length in seconds per action name.
pub type ActionCooldowns = HashMap<String, i64>;

/// Wall-clock second until which each action is cooling down.
pub type ActionCooldownState = HashMap<String, i64>;
