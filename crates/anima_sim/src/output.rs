//! Human-readable tick summary lines, each prefixed with its source tag.

use crate::simulation::SimulationTickResult;
use anima_limbic::BioTickResult;
use anima_mind::{Drive, MotivationState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency change below which a drive is not reported.
pub const DEFAULT_DRIVE_THRESHOLD: f64 = 0.15;

const DISPLAY_ORDER: [Drive; 5] = [
    Drive::Energy,
    Drive::SocialConnection,
    Drive::Stimulation,
    Drive::Safety,
    Drive::IdentityCoherence,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTag {
    Bio,
    Drives,
    Mind,
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceTag::Bio => "BIO",
            SourceTag::Drives => "DRIVES",
            SourceTag::Mind => "MIND",
        })
    }
}

pub fn tagged_line(tag: SourceTag, message: &str) -> String {
    format!("[{}] {}", tag, message)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveChange {
    pub drive: Drive,
    pub previous: f64,
    pub current: f64,
}

/// Drives whose urgency moved by at least `threshold` (negative counts as 0).
pub fn significant_drive_changes(
    previous: &MotivationState,
    current: &MotivationState,
    threshold: f64,
) -> Vec<DriveChange> {
    let threshold = threshold.max(0.0);
    DISPLAY_ORDER
        .into_iter()
        .map(|drive| DriveChange {
            drive,
            previous: previous.urgency(drive),
            current: current.urgency(drive),
        })
        .filter(|c| (c.current - c.previous).abs() >= threshold)
        .collect()
}

pub fn drive_change_lines(changes: &[DriveChange]) -> Vec<String> {
    changes
        .iter()
        .map(|c| {
            tagged_line(
                SourceTag::Drives,
                &format!(
                    "{}: {:.2} -> {:.2} ({:+.2})",
                    c.drive,
                    c.previous,
                    c.current,
                    c.current - c.previous
                ),
            )
        })
        .collect()
}

fn bio_line(bio: &BioTickResult) -> String {
    if bio.deltas.is_empty() && bio.thresholds.is_empty() {
        return tagged_line(SourceTag::Bio, "no significant biological deltas");
    }
    tagged_line(
        SourceTag::Bio,
        &format!(
            "deltas={} threshold_events={}",
            bio.deltas.len(),
            bio.thresholds.len()
        ),
    )
}

/// All summary lines for one tick.
pub fn tick_lines(
    result: &SimulationTickResult,
    previous: &MotivationState,
    drive_threshold: f64,
) -> Vec<String> {
    let mut lines = vec![bio_line(&result.bio)];
    lines.extend(drive_change_lines(&significant_drive_changes(
        previous,
        &result.motivation,
        drive_threshold,
    )));
    if !result.parsed.narrative.is_empty() {
        lines.push(tagged_line(SourceTag::Mind, &result.parsed.narrative));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significant_changes_filter() {
        let previous = MotivationState {
            energy_urgency: 0.40,
            social_urgency: 0.20,
            stimulation_urgency: 0.20,
            safety_urgency: 0.30,
            identity_urgency: 0.30,
            ..MotivationState::default()
        };
        let current = MotivationState {
            energy_urgency: 0.57,
            social_urgency: 0.25,
            stimulation_urgency: 0.37,
            safety_urgency: 0.31,
            identity_urgency: 0.10,
            ..MotivationState::default()
        };
        let drives: Vec<Drive> = significant_drive_changes(&previous, &current, 0.15)
            .into_iter()
            .map(|c| c.drive)
            .collect();
        assert_eq!(
            drives,
            vec![Drive::Energy, Drive::Stimulation, Drive::IdentityCoherence]
        );
    }

    #[test]
    fn test_drive_line_format() {
        let lines = drive_change_lines(&[
            DriveChange {
                drive: Drive::Energy,
                previous: 0.40,
                current: 0.57,
            },
            DriveChange {
                drive: Drive::IdentityCoherence,
                previous: 0.30,
                current: 0.10,
            },
        ]);
        assert_eq!(
            lines,
            vec![
                "[DRIVES] energy: 0.40 -> 0.57 (+0.17)",
                "[DRIVES] identity_coherence: 0.30 -> 0.10 (-0.20)",
            ]
        );
    }

    #[test]
    fn test_quiet_bio_line() {
        assert_eq!(
            bio_line(&BioTickResult::default()),
            "[BIO] no significant biological deltas"
        );
    }
}
