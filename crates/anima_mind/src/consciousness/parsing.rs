//! Tag extraction from raw mind output.
//!
//! A well-formed response carries `[STATE: arousal=<f>, valence=<f>]` and
//! `[ACTION: <name>]`, optionally any number of `[DRIVE: <drive>=<f>]`.
//! When STATE or ACTION is missing, or any DRIVE tag is malformed, the
//! whole turn falls back to the prior parse; only the narrative is fresh.

use super::types::{ParsedResponse, ParsedState};
use crate::motivation::{clamp01, Drive};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RE_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[STATE:\s*arousal=([-0-9.]+),\s*valence=([-0-9.]+)\]").unwrap()
});
static RE_ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[ACTION:\s*([a-z_]+)\s*\]").unwrap());
static RE_DRIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[DRIVE:\s*([a-z_]+)\s*=\s*([-0-9.]+)\s*\]").unwrap());
static RE_DRIVE_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\[DRIVE:[^\]]*\]").unwrap());
static RE_ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[(STATE|ACTION|DRIVE):[^\]]*\]").unwrap());

/// Parse `raw` against `prior`.
pub fn parse_response(raw: &str, prior: &ParsedResponse) -> ParsedResponse {
    let narrative = strip_tags(raw);
    let fallback = || ParsedResponse {
        narrative: narrative.clone(),
        ..prior.clone()
    };

    let (Some(state), Some(action)) = (parse_state(raw), parse_action(raw)) else {
        tracing::debug!("response missing STATE or ACTION tag, keeping prior parse");
        return fallback();
    };

    let drive_overrides = match parse_drive_overrides(raw) {
        DriveTags::Absent => BTreeMap::new(),
        DriveTags::Parsed(map) => map,
        DriveTags::Malformed => {
            tracing::debug!("malformed DRIVE tag, keeping prior parse");
            return fallback();
        }
    };

    ParsedResponse {
        state,
        action,
        drive_overrides,
        narrative,
    }
}

fn parse_state(raw: &str) -> Option<ParsedState> {
    let caps = RE_STATE.captures(raw)?;
    let arousal = caps[1].parse::<f64>().ok()?;
    let valence = caps[2].parse::<f64>().ok()?;
    Some(ParsedState { arousal, valence })
}

fn parse_action(raw: &str) -> Option<String> {
    RE_ACTION
        .captures(raw)
        .map(|caps| caps[1].to_ascii_lowercase())
}

enum DriveTags {
    Absent,
    Parsed(BTreeMap<Drive, f64>),
    Malformed,
}

fn parse_drive_overrides(raw: &str) -> DriveTags {
    let loose = RE_DRIVE_LOOSE.find_iter(raw).count();
    if loose == 0 {
        return DriveTags::Absent;
    }

    let strict: Vec<_> = RE_DRIVE.captures_iter(raw).collect();
    if strict.len() != loose {
        return DriveTags::Malformed;
    }

    let mut overrides = BTreeMap::new();
    for caps in strict {
        let (Ok(drive), Ok(value)) = (caps[1].parse::<Drive>(), caps[2].parse::<f64>()) else {
            return DriveTags::Malformed;
        };
        overrides.insert(drive, clamp01(value));
    }
    DriveTags::Parsed(overrides)
}

/// Remove all tags, trim every line and drop the blank ones.
pub fn strip_tags(raw: &str) -> String {
    let clean = RE_ANY_TAG.replace_all(raw, "");
    clean
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
