use crate::form::fields::DateRange;
use crate::models::member::{Branch, MilitaryStatus, Rank, ServiceType};

const PERIOD_ORDER_MESSAGE: &str = "전역일은 입대일 이후여야 합니다.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilitaryState {
    pub status: Option<MilitaryStatus>,
    pub service_type: Option<ServiceType>,
    pub branch: Option<Branch>,
    pub rank: Option<Rank>,
    pub period: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilitaryAction {
    SetStatus(Option<MilitaryStatus>),
    SetServiceType(Option<ServiceType>),
    SetBranch(Option<Branch>),
    SetRank(Option<Rank>),
    SetStartDate(String),
    SetEndDate(String),
}

/// The status gates every other field. Moving to a status without service details clears
/// them in the same transition; dependent edits while gated are dropped.
pub fn reduce(state: &MilitaryState, action: MilitaryAction) -> MilitaryState {
    match action {
        MilitaryAction::SetStatus(status)
            if status.is_some_and(MilitaryStatus::requires_service_details) =>
        {
            MilitaryState {
                status,
                ..state.clone()
            }
        }
        MilitaryAction::SetStatus(status) => MilitaryState {
            status,
            ..MilitaryState::default()
        },
        _ if !state.details_enabled() => state.clone(),
        MilitaryAction::SetServiceType(service_type) => MilitaryState {
            service_type,
            ..state.clone()
        },
        MilitaryAction::SetBranch(branch) => MilitaryState {
            branch,
            ..state.clone()
        },
        MilitaryAction::SetRank(rank) => MilitaryState {
            rank,
            ..state.clone()
        },
        MilitaryAction::SetStartDate(start) => {
            let mut next = state.clone();
            next.period.start = start;
            next
        }
        MilitaryAction::SetEndDate(end) => {
            let mut next = state.clone();
            next.period.end = end;
            next
        }
    }
}

impl MilitaryState {
    pub fn apply(&mut self, action: MilitaryAction) {
        *self = reduce(self, action);
    }

    pub fn details_enabled(&self) -> bool {
        self.status
            .is_some_and(MilitaryStatus::requires_service_details)
    }

    /// Status chosen and, when service details apply, every one of them filled in.
    pub fn is_complete(&self) -> bool {
        match self.status {
            None => false,
            Some(status) if status.requires_service_details() => {
                self.service_type.is_some()
                    && self.branch.is_some()
                    && self.rank.is_some()
                    && self.period.is_complete()
            }
            Some(_) => true,
        }
    }

    pub fn period_error(&self) -> Option<&'static str> {
        (!self.period.is_ordered()).then_some(PERIOD_ORDER_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serving() -> MilitaryState {
        MilitaryState {
            status: Some(MilitaryStatus::Serving),
            service_type: Some(ServiceType::Army),
            branch: Some(Branch::Infantry),
            rank: Some(Rank::Sergeant),
            period: DateRange {
                start: "2023-01-02".to_string(),
                end: "2024-07-01".to_string(),
            },
        }
    }

    #[test]
    fn test_leaving_service_status_clears_dependents() {
        for status in [
            MilitaryStatus::NotApplicable,
            MilitaryStatus::NotCompleted,
            MilitaryStatus::Exempted,
        ] {
            let next = reduce(&serving(), MilitaryAction::SetStatus(Some(status)));
            assert_eq!(next.status, Some(status));
            assert_eq!(next.service_type, None);
            assert_eq!(next.branch, None);
            assert_eq!(next.rank, None);
            assert!(next.period.is_empty());
        }
    }

    #[test]
    fn test_flip_flop_leaves_nothing_stale() {
        let mut state = serving();
        state.apply(MilitaryAction::SetStatus(Some(MilitaryStatus::Exempted)));
        state.apply(MilitaryAction::SetStatus(Some(MilitaryStatus::Completed)));
        assert_eq!(state.service_type, None);
        assert!(state.period.is_empty());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_switching_between_service_statuses_keeps_details() {
        let next = reduce(
            &serving(),
            MilitaryAction::SetStatus(Some(MilitaryStatus::Completed)),
        );
        assert_eq!(next.rank, Some(Rank::Sergeant));
        assert!(next.is_complete());
    }

    #[test]
    fn test_dependent_edits_ignored_while_gated() {
        let mut state = MilitaryState::default();
        state.apply(MilitaryAction::SetStatus(Some(MilitaryStatus::Exempted)));
        state.apply(MilitaryAction::SetBranch(Some(Branch::Infantry)));
        state.apply(MilitaryAction::SetStartDate("2020-01-01".to_string()));
        assert_eq!(state.branch, None);
        assert_eq!(state.period.start, "");
        assert!(state.is_complete());
    }

    #[test]
    fn test_serving_without_end_date_is_incomplete() {
        let mut state = serving();
        state.apply(MilitaryAction::SetEndDate(String::new()));
        assert!(!state.is_complete());
    }

    #[test]
    fn test_unset_status_is_incomplete() {
        assert!(!MilitaryState::default().is_complete());
    }

    #[test]
    fn test_period_order_error() {
        let mut state = serving();
        assert_eq!(state.period_error(), None);
        state.apply(MilitaryAction::SetEndDate("2022-12-31".to_string()));
        assert_eq!(state.period_error(), Some(PERIOD_ORDER_MESSAGE));
    }
}
