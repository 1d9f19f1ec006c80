#![allow(dead_code)]
use serde::{Deserialize, Serialize};

use crate::form::fields::{is_blank, DateRange};
use crate::models::education::{
    AdmissionType, ClassTimeType, EducationLevel, GraduationType, MajorKind, SchoolBranch,
    SchoolLocation,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MajorRecord {
    pub major_kind: Option<MajorKind>,
    /// Overall grade average.
    pub score: Option<f64>,
    /// Maximum of the overall grade scale, e.g. 4.5.
    pub major_standard: Option<f64>,
    pub credits_earned: Option<f64>,
    pub major_score: Option<f64>,
    pub main_major_earned: Option<f64>,
    pub main_major_standard: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationRecord {
    pub education_level: Option<EducationLevel>,
    pub admission_type: Option<AdmissionType>,
    pub graduation_type: Option<GraduationType>,
    pub school_name: String,
    pub school_location: Option<SchoolLocation>,
    pub class_time_type: Option<ClassTimeType>,
    pub school_branch: Option<SchoolBranch>,
    pub start_date: String,
    pub end_date: String,
    pub my_major: Option<MajorRecord>,
}

impl EducationRecord {
    pub fn major_allowed(&self) -> bool {
        self.education_level.is_some_and(EducationLevel::allows_major)
    }

    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.start_date.clone(),
            end: self.end_date.clone(),
        }
    }

    /// Problems worth pointing out before the record is sent anywhere.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.education_level.is_none() {
            issues.push("학력 구분을 선택해 주세요.".to_string());
        }
        if is_blank(&self.school_name) {
            issues.push("학교명을 입력해 주세요.".to_string());
        }
        if !self.period().is_ordered() {
            issues.push("졸업일은 입학일 이후여야 합니다.".to_string());
        }
        if let Some(major) = &self.my_major {
            if let (Some(score), Some(standard)) = (major.score, major.major_standard) {
                if score > standard {
                    issues.push(format!("학점({score})이 만점 기준({standard})을 넘습니다."));
                }
            }
        }
        issues
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EducationEdit {
    EducationLevel(Option<EducationLevel>),
    AdmissionType(Option<AdmissionType>),
    GraduationType(Option<GraduationType>),
    SchoolName(String),
    SchoolLocation(Option<SchoolLocation>),
    ClassTimeType(Option<ClassTimeType>),
    SchoolBranch(Option<SchoolBranch>),
    StartDate(String),
    EndDate(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum MajorEdit {
    MajorKind(Option<MajorKind>),
    Score(Option<f64>),
    MajorStandard(Option<f64>),
    CreditsEarned(Option<f64>),
    MajorScore(Option<f64>),
    MainMajorEarned(Option<f64>),
    MainMajorStandard(Option<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EducationAction {
    Add,
    Remove(usize),
    Update(usize, EducationEdit),
    UpdateMajor(usize, MajorEdit),
}

/// List reducer. Out-of-range indices leave the list unchanged.
pub fn reduce(records: &[EducationRecord], action: EducationAction) -> Vec<EducationRecord> {
    let mut next = records.to_vec();
    match action {
        EducationAction::Add => next.push(EducationRecord::default()),
        EducationAction::Remove(idx) => {
            if idx < next.len() {
                next.remove(idx);
            }
        }
        EducationAction::Update(idx, edit) => {
            if let Some(record) = next.get_mut(idx) {
                apply_edit(record, edit);
            }
        }
        EducationAction::UpdateMajor(idx, edit) => {
            if let Some(record) = next.get_mut(idx) {
                apply_major_edit(record, edit);
            }
        }
    }
    next
}

fn apply_edit(record: &mut EducationRecord, edit: EducationEdit) {
    match edit {
        EducationEdit::EducationLevel(level) => {
            record.education_level = level;
            if !record.major_allowed() {
                record.my_major = None;
            }
        }
        EducationEdit::AdmissionType(v) => record.admission_type = v,
        EducationEdit::GraduationType(v) => record.graduation_type = v,
        EducationEdit::SchoolName(v) => record.school_name = v,
        EducationEdit::SchoolLocation(v) => record.school_location = v,
        EducationEdit::ClassTimeType(v) => record.class_time_type = v,
        EducationEdit::SchoolBranch(v) => record.school_branch = v,
        EducationEdit::StartDate(v) => record.start_date = v,
        EducationEdit::EndDate(v) => record.end_date = v,
    }
}

fn apply_major_edit(record: &mut EducationRecord, edit: MajorEdit) {
    if !record.major_allowed() {
        return;
    }
    let major = record.my_major.get_or_insert_with(MajorRecord::default);
    match edit {
        MajorEdit::MajorKind(v) => major.major_kind = v,
        MajorEdit::Score(v) => major.score = v,
        MajorEdit::MajorStandard(v) => major.major_standard = v,
        MajorEdit::CreditsEarned(v) => major.credits_earned = v,
        MajorEdit::MajorScore(v) => major.major_score = v,
        MajorEdit::MainMajorEarned(v) => major.main_major_earned = v,
        MajorEdit::MainMajorStandard(v) => major.main_major_standard = v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_level(level: EducationLevel) -> Vec<EducationRecord> {
        let list = reduce(&[], EducationAction::Add);
        reduce(
            &list,
            EducationAction::Update(0, EducationEdit::EducationLevel(Some(level))),
        )
    }

    #[test]
    fn test_add_and_remove() {
        let list = reduce(&[], EducationAction::Add);
        let list = reduce(&list, EducationAction::Add);
        assert_eq!(list.len(), 2);

        let list = reduce(&list, EducationAction::Remove(5));
        assert_eq!(list.len(), 2);
        let list = reduce(&list, EducationAction::Remove(0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_major_created_lazily_for_university() {
        let list = with_level(EducationLevel::University);
        assert_eq!(list[0].my_major, None);

        let list = reduce(
            &list,
            EducationAction::UpdateMajor(0, MajorEdit::Score(Some(4.1))),
        );
        let major = list[0].my_major.as_ref().unwrap();
        assert_eq!(major.score, Some(4.1));
        assert_eq!(major.major_kind, None);
    }

    #[test]
    fn test_major_edits_ignored_for_high_school() {
        let list = with_level(EducationLevel::HighSchool);
        let list = reduce(
            &list,
            EducationAction::UpdateMajor(0, MajorEdit::MajorKind(Some(MajorKind::Main))),
        );
        assert_eq!(list[0].my_major, None);
    }

    #[test]
    fn test_level_change_drops_major() {
        let list = with_level(EducationLevel::GraduateSchool);
        let list = reduce(
            &list,
            EducationAction::UpdateMajor(0, MajorEdit::MajorKind(Some(MajorKind::Main))),
        );
        assert!(list[0].my_major.is_some());

        let kept = reduce(
            &list,
            EducationAction::Update(
                0,
                EducationEdit::EducationLevel(Some(EducationLevel::University)),
            ),
        );
        assert!(kept[0].my_major.is_some());

        let dropped = reduce(
            &list,
            EducationAction::Update(0, EducationEdit::EducationLevel(Some(EducationLevel::Ged))),
        );
        assert_eq!(dropped[0].my_major, None);

        let cleared = reduce(&list, EducationAction::Update(0, EducationEdit::EducationLevel(None)));
        assert_eq!(cleared[0].my_major, None);
    }

    #[test]
    fn test_issues() {
        let mut record = EducationRecord::default();
        assert_eq!(record.issues().len(), 2);

        record.education_level = Some(EducationLevel::University);
        record.school_name = "한국대학교".to_string();
        record.start_date = "2020-03-02".to_string();
        record.end_date = "2019-02-20".to_string();
        record.my_major = Some(MajorRecord {
            score: Some(4.6),
            major_standard: Some(4.5),
            ..Default::default()
        });
        assert_eq!(record.issues().len(), 2);
    }

    #[test]
    fn test_edit_deserializes_from_tagged_json() {
        let edit: EducationEdit =
            serde_json::from_str(r#"{"field":"schoolName","value":"한국대학교"}"#).unwrap();
        assert_eq!(edit, EducationEdit::SchoolName("한국대학교".to_string()));

        let edit: MajorEdit =
            serde_json::from_str(r#"{"field":"majorKind","value":"PLURAL"}"#).unwrap();
        assert_eq!(edit, MajorEdit::MajorKind(Some(MajorKind::Plural)));
    }
}
