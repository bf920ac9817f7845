use super::prompt_context::drive_thought_text;
use super::types::{Thought, ThoughtCategory, TickSchedule};
use crate::motivation::MotivationState;

const DRIFT_TEXT: &str = "A loose associative thread drifts into awareness.";

/// Pick a spontaneous thought when the schedule is due on `tick`.
///
/// The most urgent drive intrudes; with no urgency at all the mind drifts.
pub fn select_spontaneous_thought(
    state: &MotivationState,
    schedule: TickSchedule,
    tick: u64,
) -> Option<Thought> {
    if !schedule.due(tick) {
        return None;
    }

    match state.ranked().first() {
        Some(&(drive, urgency)) if urgency > 0.0 => Some(Thought {
            category: ThoughtCategory::Drive,
            drive: Some(drive),
            text: drive_thought_text(drive).to_string(),
        }),
        _ => Some(Thought {
            category: ThoughtCategory::AssociativeDrift,
            drive: None,
            text: DRIFT_TEXT.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motivation::Drive;

    #[test]
    fn test_not_due_yields_nothing() {
        let schedule = TickSchedule { every_ticks: 5 };
        assert!(select_spontaneous_thought(&MotivationState::default(), schedule, 3).is_none());
        assert!(select_spontaneous_thought(&MotivationState::default(), schedule, 0).is_none());
        let off = TickSchedule { every_ticks: 0 };
        assert!(select_spontaneous_thought(&MotivationState::default(), off, 10).is_none());
    }

    #[test]
    fn test_top_drive_intrudes() {
        let state = MotivationState {
            social_urgency: 0.7,
            ..MotivationState::default()
        };
        let t = select_spontaneous_thought(&state, TickSchedule { every_ticks: 5 }, 10).unwrap();
        assert_eq!(t.category, ThoughtCategory::Drive);
        assert_eq!(t.drive, Some(Drive::SocialConnection));
    }

    #[test]
    fn test_no_urgency_drifts() {
        let t = select_spontaneous_thought(
            &MotivationState::default(),
            TickSchedule { every_ticks: 1 },
            1,
        )
        .unwrap();
        assert_eq!(t.category, ThoughtCategory::AssociativeDrift);
        assert!(t.drive.is_none());
    }
}
