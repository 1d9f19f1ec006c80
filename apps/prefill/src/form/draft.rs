//! JSON drafts: a saved snapshot of every form input, replayed through [`FormAction`]s so
//! the same transitions (and the same clearing rules) apply as for live edits.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::eligibility::{
    DisabilityAction, EducationAction, EducationEdit, EducationRecord, MajorEdit, MilitaryAction,
    Presence, VeteranAction,
};
use crate::form::address::PostcodeResult;
use crate::form::file::{FileSource, PhotoAction, UploadFile};
use crate::form::page::{FormAction, PrefillForm};
use crate::models::member::{
    Branch, DisabilityLevel, DisabilityType, Gender, MilitaryStatus, Rank, ServiceType,
    VeteranEligibility, VeteranRatio,
};

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Failed to read draft {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid draft {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read photo {}: {source}", .path.display())]
    Photo {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDraft {
    pub korean_name: String,
    pub english_name: String,
    pub hanja_name: String,
    pub gender: Option<Gender>,
    pub birth_day: String,
    /// Relative paths resolve against the draft file's directory.
    pub photo: Option<PathBuf>,
    pub address: AddressDraft,
    pub email: String,
    pub phone: String,
    pub disability: DisabilityDraft,
    pub veteran: VeteranDraft,
    pub military: MilitaryDraft,
    pub education: Vec<EducationRecord>,
}

/// Either a lookup selection or manually typed values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDraft {
    pub selection: Option<PostcodeResult>,
    pub postal_code: String,
    pub base_address: String,
    pub detail_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisabilityDraft {
    pub presence: Presence,
    #[serde(rename = "type")]
    pub kind: Option<DisabilityType>,
    pub level: Option<DisabilityLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VeteranDraft {
    pub eligibility: Option<VeteranEligibility>,
    pub veteran_no: String,
    pub ratio: Option<VeteranRatio>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MilitaryDraft {
    pub status: Option<MilitaryStatus>,
    pub service_type: Option<ServiceType>,
    pub branch: Option<Branch>,
    pub rank: Option<Rank>,
    pub start_date: String,
    pub end_date: String,
}

impl FormDraft {
    pub async fn load(path: &Path) -> Result<Self, DraftError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DraftError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&raw).map_err(|source| DraftError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the photo (if any) and replays the draft into `form`.
    pub async fn replay(self, form: &mut PrefillForm, base_dir: &Path) -> Result<(), DraftError> {
        let photo = match &self.photo {
            Some(relative) => {
                let path = base_dir.join(relative);
                let file = UploadFile::from_path(&path)
                    .await
                    .map_err(|source| DraftError::Photo {
                        path: path.clone(),
                        source,
                    })?;
                info!("Loaded photo {} ({} bytes)", path.display(), file.size());
                Some(file)
            }
            None => None,
        };

        for action in self.into_actions(photo) {
            let report = form.apply(action);
            if !report.valid {
                debug!("Draft left {:?} invalid", report.control);
            }
        }
        Ok(())
    }

    /// The edits a user would make to fill the form with this draft, in form order.
    pub fn into_actions(self, photo: Option<UploadFile>) -> Vec<FormAction> {
        let mut actions = vec![
            FormAction::SetKoreanName(self.korean_name),
            FormAction::SetEnglishName(self.english_name),
            FormAction::SetHanjaName(self.hanja_name),
            FormAction::SetGender(self.gender),
            FormAction::SetBirthDay(self.birth_day),
        ];

        if let Some(file) = photo {
            actions.push(FormAction::Photo(PhotoAction::Offer(FileSource::Dialog, file)));
        }

        let address = self.address;
        match address.selection {
            Some(selection) => actions.push(FormAction::SelectAddress(selection)),
            None => actions.extend([
                FormAction::AllowManualAddress(true),
                FormAction::SetPostalCode(address.postal_code),
                FormAction::SetBaseAddress(address.base_address),
                FormAction::AllowManualAddress(false),
            ]),
        }
        actions.push(FormAction::SetDetailAddress(address.detail_address));

        actions.push(FormAction::SetEmail(self.email));
        actions.push(FormAction::PhoneInput(self.phone));
        actions.push(FormAction::PhoneBlur);

        let disability = self.disability;
        actions.push(FormAction::Disability(DisabilityAction::SetPresence(disability.presence)));
        actions.push(FormAction::Disability(DisabilityAction::SetType(disability.kind)));
        actions.push(FormAction::Disability(DisabilityAction::SetLevel(disability.level)));

        let veteran = self.veteran;
        actions.push(FormAction::Veteran(VeteranAction::SetEligibility(veteran.eligibility)));
        actions.push(FormAction::Veteran(VeteranAction::SetNumber(veteran.veteran_no)));
        if let Some(ratio) = veteran.ratio {
            actions.push(FormAction::Veteran(VeteranAction::SetRatio(ratio)));
        }

        let military = self.military;
        actions.extend(
            [
                MilitaryAction::SetStatus(military.status),
                MilitaryAction::SetServiceType(military.service_type),
                MilitaryAction::SetBranch(military.branch),
                MilitaryAction::SetRank(military.rank),
                MilitaryAction::SetStartDate(military.start_date),
                MilitaryAction::SetEndDate(military.end_date),
            ]
            .into_iter()
            .map(FormAction::Military),
        );

        for (idx, record) in self.education.into_iter().enumerate() {
            actions.extend(education_actions(idx, record).into_iter().map(FormAction::Education));
        }

        actions
    }
}

fn education_actions(idx: usize, record: EducationRecord) -> Vec<EducationAction> {
    let edits = [
        EducationEdit::EducationLevel(record.education_level),
        EducationEdit::AdmissionType(record.admission_type),
        EducationEdit::GraduationType(record.graduation_type),
        EducationEdit::SchoolName(record.school_name),
        EducationEdit::SchoolLocation(record.school_location),
        EducationEdit::ClassTimeType(record.class_time_type),
        EducationEdit::SchoolBranch(record.school_branch),
        EducationEdit::StartDate(record.start_date),
        EducationEdit::EndDate(record.end_date),
    ];

    let mut actions = vec![EducationAction::Add];
    actions.extend(edits.into_iter().map(|e| EducationAction::Update(idx, e)));

    if let Some(major) = record.my_major {
        let major_edits = [
            MajorEdit::MajorKind(major.major_kind),
            MajorEdit::Score(major.score),
            MajorEdit::MajorStandard(major.major_standard),
            MajorEdit::CreditsEarned(major.credits_earned),
            MajorEdit::MajorScore(major.major_score),
            MajorEdit::MainMajorEarned(major.main_major_earned),
            MajorEdit::MainMajorStandard(major.main_major_standard),
        ];
        actions.extend(
            major_edits
                .into_iter()
                .map(|e| EducationAction::UpdateMajor(idx, e)),
        );
    }
    actions
}
