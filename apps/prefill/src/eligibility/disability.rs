#![allow(dead_code)]
use serde::{Deserialize, Serialize};

use crate::models::member::{DisabilityLevel, DisabilityType};

/// Primary answer of the disability question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    #[default]
    Unset,
    Has,
    Absent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabilityState {
    pub presence: Presence,
    pub kind: Option<DisabilityType>,
    pub level: Option<DisabilityLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabilityAction {
    SetPresence(Presence),
    SetType(Option<DisabilityType>),
    SetLevel(Option<DisabilityLevel>),
}

/// Answering anything but "has" wipes type and level in the same step. Type and level edits
/// only land while "has" is selected.
pub fn reduce(state: &DisabilityState, action: DisabilityAction) -> DisabilityState {
    match action {
        DisabilityAction::SetPresence(Presence::Has) => DisabilityState {
            presence: Presence::Has,
            ..state.clone()
        },
        DisabilityAction::SetPresence(presence) => DisabilityState {
            presence,
            kind: None,
            level: None,
        },
        DisabilityAction::SetType(kind) if state.presence == Presence::Has => DisabilityState {
            kind,
            ..state.clone()
        },
        DisabilityAction::SetLevel(level) if state.presence == Presence::Has => DisabilityState {
            level,
            ..state.clone()
        },
        DisabilityAction::SetType(_) | DisabilityAction::SetLevel(_) => state.clone(),
    }
}

impl DisabilityState {
    pub fn apply(&mut self, action: DisabilityAction) {
        *self = reduce(self, action);
    }

    pub fn is_valid(&self, required: bool) -> bool {
        match self.presence {
            Presence::Unset => !required,
            Presence::Has => self.kind.is_some() && self.level.is_some(),
            Presence::Absent => true,
        }
    }

    /// Whether the type and level inputs are shown.
    pub fn details_visible(&self) -> bool {
        self.presence == Presence::Has
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> DisabilityState {
        DisabilityState {
            presence: Presence::Has,
            kind: Some(DisabilityType::Hearing),
            level: Some(DisabilityLevel::Severe),
        }
    }

    #[test]
    fn test_absent_always_clears_details() {
        let starts = [
            DisabilityState::default(),
            filled(),
            DisabilityState {
                presence: Presence::Has,
                kind: Some(DisabilityType::Visual),
                level: None,
            },
        ];
        for start in starts {
            let next = reduce(&start, DisabilityAction::SetPresence(Presence::Absent));
            assert_eq!(next.presence, Presence::Absent);
            assert_eq!(next.kind, None);
            assert_eq!(next.level, None);
        }
    }

    #[test]
    fn test_has_keeps_existing_details() {
        let state = reduce(&filled(), DisabilityAction::SetPresence(Presence::Has));
        assert_eq!(state, filled());
    }

    #[test]
    fn test_details_ignored_unless_has() {
        let state = DisabilityState {
            presence: Presence::Absent,
            ..Default::default()
        };
        let next = reduce(&state, DisabilityAction::SetType(Some(DisabilityType::Mental)));
        assert_eq!(next.kind, None);
        assert!(!next.details_visible());
    }

    #[test]
    fn test_validity() {
        let mut state = DisabilityState::default();
        assert!(!state.is_valid(true));
        assert!(state.is_valid(false));

        state.apply(DisabilityAction::SetPresence(Presence::Has));
        assert!(!state.is_valid(false));
        state.apply(DisabilityAction::SetType(Some(DisabilityType::Kidney)));
        assert!(!state.is_valid(true));
        state.apply(DisabilityAction::SetLevel(Some(DisabilityLevel::NotSevere)));
        assert!(state.is_valid(true));

        state.apply(DisabilityAction::SetPresence(Presence::Absent));
        assert!(state.is_valid(true));
    }
}
