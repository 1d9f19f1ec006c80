use crate::form::fields::is_blank;
use crate::models::member::{VeteranEligibility, VeteranRatio};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VeteranState {
    pub eligibility: Option<VeteranEligibility>,
    pub veteran_no: String,
    pub ratio: VeteranRatio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VeteranAction {
    SetEligibility(Option<VeteranEligibility>),
    SetNumber(String),
    SetRatio(VeteranRatio),
}

/// Ineligible pins the ratio to 0 and drops the number. Eligible keeps the number and starts
/// the ratio at 5% when coming from a zero ratio. Number and ratio edits only land while eligible.
pub fn reduce(state: &VeteranState, action: VeteranAction) -> VeteranState {
    match action {
        VeteranAction::SetEligibility(Some(VeteranEligibility::Ineligible)) => VeteranState {
            eligibility: Some(VeteranEligibility::Ineligible),
            ..VeteranState::default()
        },
        VeteranAction::SetEligibility(Some(VeteranEligibility::Eligible)) => {
            let ratio = if !state.is_eligible() && state.ratio == VeteranRatio::Zero {
                VeteranRatio::Five
            } else {
                state.ratio
            };
            VeteranState {
                eligibility: Some(VeteranEligibility::Eligible),
                veteran_no: state.veteran_no.clone(),
                ratio,
            }
        }
        VeteranAction::SetEligibility(None) => VeteranState::default(),
        VeteranAction::SetNumber(veteran_no) if state.is_eligible() => VeteranState {
            veteran_no,
            ..state.clone()
        },
        VeteranAction::SetRatio(ratio) if state.is_eligible() => VeteranState {
            ratio,
            ..state.clone()
        },
        VeteranAction::SetNumber(_) | VeteranAction::SetRatio(_) => state.clone(),
    }
}

impl VeteranState {
    pub fn apply(&mut self, action: VeteranAction) {
        *self = reduce(self, action);
    }

    pub fn is_eligible(&self) -> bool {
        self.eligibility == Some(VeteranEligibility::Eligible)
    }

    /// Optional: only an eligible answer without a number is invalid.
    /// Required: an answer is needed, eligible needs a number, ineligible needs a zero ratio.
    pub fn is_valid(&self, required: bool) -> bool {
        match (self.eligibility, required) {
            (Some(VeteranEligibility::Eligible), _) => !is_blank(&self.veteran_no),
            (None, true) => false,
            (Some(VeteranEligibility::Ineligible), true) => self.ratio == VeteranRatio::Zero,
            (_, false) => true,
        }
    }

    /// Submit gate: eligible also needs a non-zero ratio.
    pub fn is_complete(&self) -> bool {
        match self.eligibility {
            None => false,
            Some(VeteranEligibility::Ineligible) => true,
            Some(VeteranEligibility::Eligible) => {
                !is_blank(&self.veteran_no) && self.ratio != VeteranRatio::Zero
            }
        }
    }
}
