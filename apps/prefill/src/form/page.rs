#![allow(dead_code)]
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::eligibility::{
    DisabilityAction, DisabilityState, EducationAction, EducationRecord, MilitaryAction,
    MilitaryState, VeteranAction, VeteranState,
};
use crate::form::address::{AddressField, FocusTarget, PostcodeResult};
use crate::form::email::EmailField;
use crate::form::fields::{is_blank, parse_iso_date};
use crate::form::file::{FileConstraints, PhotoAction, PhotoField, PreviewRegistry};
use crate::form::phone::{PhoneField, StoreMode};
use crate::form::submit::{
    Banner, InFlight, Notice, SubmitOutcome, SubmitPhase, SubmitRejection, SubmitState,
};
use crate::http_client::ApiError;
use crate::member_api::payload::{
    DisabilityPayload, MemberPayload, MilitaryPayload, VeteranPayload,
};
use crate::member_api::{MemberApi, MemberInitResponse, SubmissionPayload};
use crate::models::member::{Gender, VeteranRatio};
use crate::models::Choice;
use crate::postcode::LoadState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    KoreanName,
    EnglishName,
    HanjaName,
    Gender,
    BirthDay,
    Photo,
    Address,
    Email,
    Phone,
    Disability,
    Veteran,
    Military,
    Education,
}

/// Every way the form can be edited. The form changes only through [`PrefillForm::apply`].
#[derive(Debug)]
pub enum FormAction {
    SetKoreanName(String),
    SetEnglishName(String),
    SetHanjaName(String),
    SetGender(Option<Gender>),
    SetBirthDay(String),
    Photo(PhotoAction),
    ToggleAddressLookup(LoadState),
    SelectAddress(PostcodeResult),
    AllowManualAddress(bool),
    SetPostalCode(String),
    SetBaseAddress(String),
    SetDetailAddress(String),
    SetEmail(String),
    SetEmailLocal(String),
    SetEmailDomain(String),
    SelectEmailDomain(String),
    PhoneInput(String),
    PhoneBlur,
    Disability(DisabilityAction),
    Veteran(VeteranAction),
    Military(MilitaryAction),
    Education(EducationAction),
}

/// What a control reports back after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlReport {
    pub control: Control,
    pub valid: bool,
    pub focus: Option<FocusTarget>,
}

impl ControlReport {
    fn new(control: Control, valid: bool) -> Self {
        Self {
            control,
            valid,
            focus: None,
        }
    }
}

/// A condition that has to hold before the form may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    KoreanName,
    EnglishName,
    HanjaName,
    Gender,
    BirthDay,
    Photo,
    PostalCode,
    BaseAddress,
    DetailAddress,
    Email,
    Phone,
    VeteranEligibility,
    VeteranNumber,
    VeteranRatio,
    MilitaryStatus,
    ServiceType,
    Branch,
    Rank,
    ServiceStartDate,
    ServiceEndDate,
}

impl Requirement {
    pub fn label(self) -> &'static str {
        match self {
            Requirement::KoreanName => "한글 이름",
            Requirement::EnglishName => "영문 이름",
            Requirement::HanjaName => "한자 이름",
            Requirement::Gender => "성별",
            Requirement::BirthDay => "생년월일",
            Requirement::Photo => "프로필 사진",
            Requirement::PostalCode => "우편번호",
            Requirement::BaseAddress => "기본 주소",
            Requirement::DetailAddress => "상세 주소",
            Requirement::Email => "이메일",
            Requirement::Phone => "휴대폰 번호",
            Requirement::VeteranEligibility => "보훈 대상 여부",
            Requirement::VeteranNumber => "보훈 번호",
            Requirement::VeteranRatio => "보훈 비율",
            Requirement::MilitaryStatus => "병역 사항",
            Requirement::ServiceType => "군별",
            Requirement::Branch => "병과",
            Requirement::Rank => "계급",
            Requirement::ServiceStartDate => "입대일",
            Requirement::ServiceEndDate => "전역일",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inline error attached to one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub control: Control,
    pub message: String,
}

/// Canonical state of the resume prefill form.
#[derive(Debug)]
pub struct PrefillForm {
    korean_name: String,
    english_name: String,
    hanja_name: String,
    gender: Option<Gender>,
    birth_day: String,
    photo: PhotoField,
    address: AddressField,
    email: EmailField,
    phone: PhoneField,
    disability: DisabilityState,
    veteran: VeteranState,
    military: MilitaryState,
    education: Vec<EducationRecord>,
    submit: SubmitState,
}

impl Default for PrefillForm {
    fn default() -> Self {
        Self::new(FileConstraints::default(), PreviewRegistry::default())
    }
}

impl PrefillForm {
    pub fn new(photo_constraints: FileConstraints, previews: PreviewRegistry) -> Self {
        Self {
            korean_name: String::new(),
            english_name: String::new(),
            hanja_name: String::new(),
            gender: None,
            birth_day: String::new(),
            photo: PhotoField::new(photo_constraints, previews),
            address: AddressField::default(),
            email: EmailField::default(),
            phone: PhoneField::new(true, StoreMode::Digits),
            disability: DisabilityState::default(),
            veteran: VeteranState::default(),
            military: MilitaryState::default(),
            education: Vec::new(),
            submit: SubmitState::default(),
        }
    }

    pub fn with_phone_mode(mut self, mode: StoreMode) -> Self {
        self.phone.store_mode = mode;
        self
    }

    pub fn apply(&mut self, action: FormAction) -> ControlReport {
        let report = match action {
            FormAction::SetKoreanName(v) => {
                self.korean_name = v;
                ControlReport::new(Control::KoreanName, !is_blank(&self.korean_name))
            }
            FormAction::SetEnglishName(v) => {
                self.english_name = v;
                ControlReport::new(Control::EnglishName, !is_blank(&self.english_name))
            }
            FormAction::SetHanjaName(v) => {
                self.hanja_name = v;
                ControlReport::new(Control::HanjaName, !is_blank(&self.hanja_name))
            }
            FormAction::SetGender(v) => {
                self.gender = v;
                ControlReport::new(Control::Gender, v.is_some())
            }
            FormAction::SetBirthDay(v) => {
                self.birth_day = v;
                ControlReport::new(Control::BirthDay, parse_iso_date(&self.birth_day).is_some())
            }
            FormAction::Photo(action) => {
                if let Err(rejection) = self.photo.apply(action) {
                    warn!("Photo rejected: {rejection}");
                }
                ControlReport::new(
                    Control::Photo,
                    self.photo.error().is_none() && self.photo.is_valid(),
                )
            }
            FormAction::ToggleAddressLookup(widget) => {
                self.address.toggle_lookup(&widget);
                ControlReport::new(Control::Address, self.address.is_valid())
            }
            FormAction::SelectAddress(result) => {
                let focus = self.address.apply_selection(&result);
                ControlReport {
                    focus: Some(focus),
                    ..ControlReport::new(Control::Address, self.address.is_valid())
                }
            }
            FormAction::AllowManualAddress(allow) => {
                self.address.editable_postal_code = allow;
                self.address.editable_base = allow;
                ControlReport::new(Control::Address, self.address.is_valid())
            }
            FormAction::SetPostalCode(v) => {
                self.address.set_postal_code(&v);
                ControlReport::new(Control::Address, self.address.is_valid())
            }
            FormAction::SetBaseAddress(v) => {
                self.address.set_base(&v);
                ControlReport::new(Control::Address, self.address.is_valid())
            }
            FormAction::SetDetailAddress(v) => {
                self.address.set_detail(&v);
                ControlReport::new(Control::Address, self.address.is_valid())
            }
            FormAction::SetEmail(v) => {
                self.email.set_value(&v);
                ControlReport::new(Control::Email, self.email.is_valid())
            }
            FormAction::SetEmailLocal(v) => {
                self.email.set_local(&v);
                ControlReport::new(Control::Email, self.email.is_valid())
            }
            FormAction::SetEmailDomain(v) => {
                self.email.set_domain(&v);
                ControlReport::new(Control::Email, self.email.is_valid())
            }
            FormAction::SelectEmailDomain(v) => {
                self.email.select_domain(&v);
                ControlReport::new(Control::Email, self.email.is_valid())
            }
            FormAction::PhoneInput(v) => {
                let valid = self.phone.input(&v);
                ControlReport::new(Control::Phone, valid)
            }
            FormAction::PhoneBlur => {
                let valid = self.phone.blur();
                ControlReport::new(Control::Phone, valid)
            }
            FormAction::Disability(action) => {
                self.disability.apply(action);
                ControlReport::new(Control::Disability, self.disability.is_valid(false))
            }
            FormAction::Veteran(action) => {
                self.veteran.apply(action);
                ControlReport::new(Control::Veteran, self.veteran.is_valid(true))
            }
            FormAction::Military(action) => {
                self.military.apply(action);
                ControlReport::new(Control::Military, self.military.is_complete())
            }
            FormAction::Education(action) => {
                self.education = crate::eligibility::education::reduce(&self.education, action);
                let valid = self.education.iter().all(|r| r.issues().is_empty());
                ControlReport::new(Control::Education, valid)
            }
        };
        debug!("{:?} updated (valid: {})", report.control, report.valid);
        report
    }

    /// Every unmet submit condition, in form order. Formats are the controls' business;
    /// this only checks presence.
    pub fn missing_requirements(&self) -> Vec<Requirement> {
        let mut missing = Vec::new();
        let mut need = |ok: bool, requirement: Requirement| {
            if !ok {
                missing.push(requirement);
            }
        };

        need(!is_blank(&self.korean_name), Requirement::KoreanName);
        need(!is_blank(&self.english_name), Requirement::EnglishName);
        need(!is_blank(&self.hanja_name), Requirement::HanjaName);
        need(self.gender.is_some(), Requirement::Gender);
        need(!is_blank(&self.birth_day), Requirement::BirthDay);
        need(self.photo.has_file(), Requirement::Photo);

        need(!is_blank(self.address.postal_code()), Requirement::PostalCode);
        need(!is_blank(self.address.base()), Requirement::BaseAddress);
        need(!is_blank(self.address.detail()), Requirement::DetailAddress);

        need(!is_blank(&self.email.value()), Requirement::Email);
        need(!is_blank(&self.phone.stored_value()), Requirement::Phone);

        let veteran = &self.veteran;
        if !veteran.is_complete() {
            need(veteran.eligibility.is_some(), Requirement::VeteranEligibility);
            if veteran.is_eligible() {
                need(!is_blank(&veteran.veteran_no), Requirement::VeteranNumber);
                need(veteran.ratio != VeteranRatio::Zero, Requirement::VeteranRatio);
            }
        }

        let military = &self.military;
        need(military.status.is_some(), Requirement::MilitaryStatus);
        if military.details_enabled() {
            need(military.service_type.is_some(), Requirement::ServiceType);
            need(military.branch.is_some(), Requirement::Branch);
            need(military.rank.is_some(), Requirement::Rank);
            need(!is_blank(&military.period.start), Requirement::ServiceStartDate);
            need(!is_blank(&military.period.end), Requirement::ServiceEndDate);
        }

        missing
    }

    pub fn can_submit(&self) -> bool {
        self.missing_requirements().is_empty()
    }

    /// Inline errors the controls currently display.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut push = |control: Control, message: String| {
            errors.push(FieldError { control, message });
        };

        if !is_blank(&self.birth_day) && parse_iso_date(&self.birth_day).is_none() {
            push(Control::BirthDay, "생년월일 형식을 확인해 주세요. 예) 1990-01-31".to_string());
        }
        if let Some(rejection) = self.photo.error() {
            push(Control::Photo, rejection.to_string());
        }
        if !self.address.postal_code().is_empty() {
            if let Some(message) = self.address.error() {
                push(Control::Address, message.to_string());
            }
        }
        if !is_blank(&self.email.value()) {
            if let Some(message) = self.email.error() {
                push(Control::Email, message.to_string());
            }
        }
        if let Some(message) = self.phone.error() {
            push(Control::Phone, message.to_string());
        }
        if !self.disability.is_valid(false) {
            push(Control::Disability, "장애 유형과 정도를 선택해 주세요.".to_string());
        }
        if !self.veteran.is_valid(false) {
            push(Control::Veteran, "보훈 번호를 입력해 주세요.".to_string());
        }
        if let Some(message) = self.military.period_error() {
            push(Control::Military, message.to_string());
        }
        for (idx, record) in self.education.iter().enumerate() {
            for issue in record.issues() {
                push(Control::Education, format!("학력 {}: {}", idx + 1, issue));
            }
        }

        errors
    }

    /// Backend-shaped snapshot of the current state. Strings are trimmed; unset choices
    /// become empty strings.
    pub fn build_payload(&self) -> SubmissionPayload {
        fn code<C: Choice>(choice: Option<C>) -> String {
            choice.map(|c| c.code().to_string()).unwrap_or_default()
        }
        fn trimmed(s: &str) -> String {
            s.trim().to_string()
        }

        SubmissionPayload {
            member: MemberPayload {
                korean_name: trimmed(&self.korean_name),
                english_name: trimmed(&self.english_name),
                hanja_name: trimmed(&self.hanja_name),
                gender: code(self.gender),
                birth_day: trimmed(&self.birth_day),
                address_num: trimmed(self.address.postal_code()),
                address: trimmed(self.address.base()),
                address_detail: trimmed(self.address.detail()),
                email: trimmed(&self.email.value()),
                phone_num: trimmed(&self.phone.stored_value()),
            },
            disability: DisabilityPayload {
                disability_type: code(self.disability.kind),
                disability_level: code(self.disability.level),
            },
            veteran: VeteranPayload {
                veteran_no: trimmed(&self.veteran.veteran_no),
                veteran_ratio: self.veteran.ratio.percent(),
            },
            military: MilitaryPayload {
                status: code(self.military.status),
                service_type: code(self.military.service_type),
                branch: code(self.military.branch),
                rank: code(self.military.rank),
                military_start_date: trimmed(&self.military.period.start),
                military_end_date: trimmed(&self.military.period.end),
            },
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Submit lifecycle
    // ────────────────────────────────────────────────────────────────────────

    /// Checks the submit conditions and, when they hold, enters the submitting phase and
    /// returns the payload to send.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitRejection> {
        let missing = self.missing_requirements();
        self.submit.begin(missing)?;
        Ok(self.build_payload())
    }

    /// Records the result of the request. Field values are left exactly as they were.
    pub fn finish_submit(&mut self, result: Result<MemberInitResponse, ApiError>) -> SubmitOutcome {
        self.submit.finish(result)
    }

    pub async fn submit<A: MemberApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<SubmitOutcome, SubmitRejection> {
        let payload = self.begin_submit()?;
        let in_flight = InFlight::new(&mut self.submit);
        let result = api.save_all(&payload).await;
        Ok(in_flight.finish(result))
    }

    pub fn phase(&self) -> SubmitPhase {
        self.submit.phase()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.submit.notice()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.submit.take_notice()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.submit.banner()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Read access
    // ────────────────────────────────────────────────────────────────────────

    pub fn photo(&self) -> &PhotoField {
        &self.photo
    }

    pub fn address(&self) -> &AddressField {
        &self.address
    }

    pub fn email(&self) -> &EmailField {
        &self.email
    }

    pub fn phone(&self) -> &PhoneField {
        &self.phone
    }

    pub fn disability(&self) -> &DisabilityState {
        &self.disability
    }

    pub fn veteran(&self) -> &VeteranState {
        &self.veteran
    }

    pub fn military(&self) -> &MilitaryState {
        &self.military
    }

    pub fn education(&self) -> &[EducationRecord] {
        &self.education
    }
}
