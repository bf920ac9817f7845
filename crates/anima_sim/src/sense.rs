//! Operator line classification.
//!
//! `*text*` is something done to the person, `~text` describes the
//! environment, anything else is speech. Blank lines are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Speech,
    Action,
    Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInput {
    pub kind: InputKind,
    pub content: String,
}

pub trait SenseParser: Send + Sync {
    /// `None` for input that carries nothing.
    fn parse(&self, raw: &str) -> Option<ParsedInput>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionParser;

impl SenseParser for ConventionParser {
    fn parse(&self, raw: &str) -> Option<ParsedInput> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(inner) = trimmed
            .strip_prefix('*')
            .and_then(|s| s.strip_suffix('*'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return Some(ParsedInput {
                kind: InputKind::Action,
                content: inner.to_string(),
            });
        }

        if let Some(rest) = trimmed.strip_prefix('~') {
            return Some(ParsedInput {
                kind: InputKind::Environment,
                content: rest.trim().to_string(),
            });
        }

        Some(ParsedInput {
            kind: InputKind::Speech,
            content: trimmed.to_string(),
        })
    }
}
