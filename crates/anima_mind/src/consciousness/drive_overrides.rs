//! Perceived motivation: the mind's own drive reports bend the computed
//! urgencies, but can never push a drive below half its raw value.

use super::types::ParsedResponse;
use crate::motivation::{clamp01, Drive, MotivationState};
use std::collections::BTreeMap;

/// Apply overrides and re-select the active goal.
pub fn apply_drive_overrides(raw: &MotivationState, overrides: &BTreeMap<Drive, f64>) -> MotivationState {
    let mut result = *raw;
    for drive in Drive::PRIORITY {
        let raw_urgency = clamp01(raw.urgency(drive));
        let effective = match overrides.get(&drive) {
            Some(&value) => clamp01(value).max(raw_urgency * 0.5),
            None => raw_urgency,
        };
        *result.urgency_mut(drive) = effective;
    }
    result.reselect_goal();
    result
}

/// The drive state the next tick should perceive after this parse.
pub fn perceived_motivation(raw: &MotivationState, parsed: &ParsedResponse) -> MotivationState {
    apply_drive_overrides(raw, &parsed.drive_overrides)
}
