#![allow(dead_code)]
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::form::page::Requirement;
use crate::http_client::ApiError;
use crate::member_api::MemberInitResponse;

pub const SAVED_MESSAGE: &str = "저장되었습니다.";
pub const BLOCKED_MESSAGE: &str = "필수 항목을 모두 입력해주세요.";
pub const FALLBACK_ERROR_MESSAGE: &str = "요청 중 오류가 발생했습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// One-shot modal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            text: text.into(),
        }
    }
}

/// Inline message shown above the submit button until the next attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Banner {
    Saved(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("a submission is already in flight")]
    InFlight,

    #[error("필수 항목을 모두 입력해주세요. ({})", join_labels(.0))]
    Blocked(Vec<Requirement>),
}

fn join_labels(missing: &[Requirement]) -> String {
    missing
        .iter()
        .map(|r| r.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(MemberInitResponse),
    Failed(ApiError),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

/// Submit lifecycle: `Idle → Validating → (Idle | Submitting → Idle)`.
#[derive(Debug, Clone, Default)]
pub struct SubmitState {
    phase: SubmitPhase,
    notice: Option<Notice>,
    banner: Option<Banner>,
}

impl SubmitState {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hands out the pending notice once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Validates `missing` and, when it is empty, enters `Submitting`. Re-entry while a
    /// request is outstanding is rejected without touching any state.
    pub fn begin(&mut self, missing: Vec<Requirement>) -> Result<(), SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::InFlight);
        }

        self.phase = SubmitPhase::Validating;
        if !missing.is_empty() {
            warn!("Submit blocked: missing {}", join_labels(&missing));
            self.notice = Some(Notice::new(NoticeLevel::Warning, "제출 불가", BLOCKED_MESSAGE));
            self.phase = SubmitPhase::Idle;
            return Err(SubmitRejection::Blocked(missing));
        }

        self.banner = None;
        self.phase = SubmitPhase::Submitting;
        Ok(())
    }

    pub fn finish(&mut self, result: Result<MemberInitResponse, ApiError>) -> SubmitOutcome {
        self.phase = SubmitPhase::Idle;
        match result {
            Ok(response) => {
                let text = response
                    .message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SAVED_MESSAGE.to_string());
                info!("Submit succeeded (id: {})", response.id);
                self.notice = Some(Notice::new(NoticeLevel::Success, "저장 완료", text.clone()));
                self.banner = Some(Banner::Saved(text));
                SubmitOutcome::Saved(response)
            }
            Err(e) => {
                let text = if e.message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    e.message.clone()
                };
                warn!("Submit failed: status={} kind={:?} {}", e.status, e.kind, text);
                self.notice = Some(Notice::new(NoticeLevel::Error, "저장 실패", text.clone()));
                self.banner = Some(Banner::Failed(text));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

/// Holds the `Submitting` phase for one outstanding request. Dropping it without
/// [`InFlight::finish`] (a cancelled future) puts the form back to `Idle` so it can be
/// submitted again.
pub struct InFlight<'a> {
    state: &'a mut SubmitState,
}

impl<'a> InFlight<'a> {
    pub fn new(state: &'a mut SubmitState) -> Self {
        Self { state }
    }

    pub fn finish(self, result: Result<MemberInitResponse, ApiError>) -> SubmitOutcome {
        self.state.finish(result)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.state.is_submitting() {
            warn!("Submit abandoned before the response arrived");
            self.state.phase = SubmitPhase::Idle;
        }
    }
}
