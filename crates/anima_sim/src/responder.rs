//! Local mind responders.
//!
//! Neither talks to a language model. [`AutopilotMind`] answers from the
//! request itself so the loop can run unattended; [`ScriptedMind`] replays
//! canned responses for tests and demos.

use crate::collaborators::{MindRequest, MindResponder};
use anima_core::clamp;
use anima_mind::{action_candidates_for, Action, ActionConstraints};

/// Derives a well-formed tagged response from the active drive.
///
/// Deterministic: the same request always yields the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutopilotMind;

impl AutopilotMind {
    fn constraints(request: &MindRequest) -> ActionConstraints {
        let input = &request.input;
        ActionConstraints {
            has_food: input.is_allowed(Action::Eat.as_str()),
            has_people_nearby: !input.external_text.is_empty()
                && input.is_allowed(Action::ReachOut.as_str()),
            can_rest: input.is_allowed(Action::Rest.as_str()),
            can_explore: input.is_allowed(Action::ScanArea.as_str()),
            has_quiet_space: input.is_allowed(Action::Rest.as_str()),
        }
    }

    fn choose_action(request: &MindRequest) -> Action {
        let bio = &request.bio;
        let input = &request.input;
        if bio.body_temp < 35.5 && input.is_allowed(Action::SeekWarmth.as_str()) {
            return Action::SeekWarmth;
        }
        if bio.body_temp > 38.5 && input.is_allowed(Action::SeekCooling.as_str()) {
            return Action::SeekCooling;
        }

        let candidates = action_candidates_for(request.motivation.active_goal, &Self::constraints(request));
        candidates
            .iter()
            .copied()
            .find(|a| input.is_allowed(a.as_str()))
            .or_else(|| candidates.first().copied())
            .unwrap_or(Action::Breathe)
    }
}

impl MindResponder for AutopilotMind {
    fn respond(&mut self, request: &MindRequest) -> String {
        let bio = &request.bio;
        let arousal = clamp(0.8 * bio.stress + 0.4 * bio.physical_tension - 0.3, -1.0, 1.0);
        let valence = clamp(2.0 * bio.mood - 1.0, -1.0, 1.0);
        let action = Self::choose_action(request);
        let goal = request.motivation.active_goal;

        let felt = request
            .prompt
            .primary
            .first()
            .map(|d| d.felt.as_str())
            .unwrap_or("nothing in particular.");

        format!(
            "I notice {}\n{}\n[STATE: arousal={:.2}, valence={:.2}]\n[ACTION: {}]\n[DRIVE: {}={:.2}]",
            felt,
            request.prompt.goal_pull,
            arousal,
            valence,
            action,
            goal,
            request.motivation.active_goal_urgency,
        )
    }
}

/// Replays a fixed list of raw responses, cycling.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMind {
    responses: Vec<String>,
    next: usize,
}

impl ScriptedMind {
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    /// One response per blank-line separated block.
    pub fn from_script(script: &str) -> Self {
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in script.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    blocks.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            blocks.push(current.join("\n"));
        }
        Self::new(blocks)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl MindResponder for ScriptedMind {
    fn respond(&mut self, _request: &MindRequest) -> String {
        if self.responses.is_empty() {
            return String::new();
        }
        let response = self.responses[self.next % self.responses.len()].clone();
        self.next = (self.next + 1) % self.responses.len();
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::TickInput;
    use crate::input::default_allowed_actions;
    use anima_core::BioState;
    use anima_mind::consciousness::{build_prompt_context, parse_response, ParsedResponse};
    use anima_mind::{compute, Drive, MotivationState};

    fn request(bio: BioState, allowed: bool) -> MindRequest {
        let motivation = compute(&bio, &Default::default(), &Default::default());
        MindRequest {
            prompt: build_prompt_context(&motivation),
            bio,
            motivation,
            input: TickInput {
                allowed_actions: if allowed {
                    default_allowed_actions()
                } else {
                    Default::default()
                },
                ..TickInput::default()
            },
            prior_parsed: ParsedResponse::default(),
        }
    }

    #[test]
    fn test_autopilot_is_well_formed() {
        let req = request(BioState::default(), true);
        let raw = AutopilotMind.respond(&req);
        let parsed = parse_response(&raw, &ParsedResponse::default());
        assert!(!parsed.action.is_empty());
        assert!(parsed.narrative.starts_with("I notice"));
        assert_eq!(parsed.drive_overrides.len(), 1);
        assert_eq!(AutopilotMind.respond(&req), raw);
    }

    #[test]
    fn test_autopilot_eats_when_hungry() {
        let bio = BioState {
            energy: 0.1,
            hunger: 0.9,
            ..BioState::default()
        };
        let req = request(bio, true);
        assert_eq!(req.motivation.active_goal, Drive::Energy);
        let parsed = parse_response(&AutopilotMind.respond(&req), &ParsedResponse::default());
        assert_eq!(parsed.action, "eat");
    }

    #[test]
    fn test_autopilot_seeks_warmth_when_cold() {
        let bio = BioState {
            body_temp: 34.0,
            ..BioState::default()
        };
        let parsed = parse_response(
            &AutopilotMind.respond(&request(bio, true)),
            &ParsedResponse::default(),
        );
        assert_eq!(parsed.action, "seek_warmth");
    }

    #[test]
    fn test_autopilot_with_nothing_allowed_still_answers() {
        let mut req = request(BioState::default(), false);
        req.motivation = MotivationState {
            safety_urgency: 0.9,
            ..MotivationState::default()
        };
        req.motivation.reselect_goal();
        let parsed = parse_response(&AutopilotMind.respond(&req), &ParsedResponse::default());
        assert_eq!(parsed.action, "breathe");
    }

    #[test]
    fn test_scripted_cycles() {
        let mut mind = ScriptedMind::new(["a", "b"]);
        let req = request(BioState::default(), true);
        assert_eq!(mind.respond(&req), "a");
        assert_eq!(mind.respond(&req), "b");
        assert_eq!(mind.respond(&req), "a");
    }

    #[test]
    fn test_script_blocks() {
        let mind = ScriptedMind::from_script("one\n[ACTION: eat]\n\n\ntwo\n  \nthree\n");
        assert_eq!(mind.len(), 3);
        assert_eq!(mind.responses[0], "one\n[ACTION: eat]");
    }

    #[test]
    fn test_empty_script_answers_empty() {
        let mut mind = ScriptedMind::from_script("\n\n");
        assert!(mind.is_empty());
        assert_eq!(mind.respond(&request(BioState::default(), true)), "");
    }
}
