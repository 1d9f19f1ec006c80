#![allow(dead_code)]
use serde::{Deserialize, Serialize};

/// Body of the member init call. Every optional field is sent as `""` rather than omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub member: MemberPayload,
    pub disability: DisabilityPayload,
    pub veteran: VeteranPayload,
    pub military: MilitaryPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub korean_name: String,
    pub english_name: String,
    pub hanja_name: String,
    pub gender: String,
    pub birth_day: String,
    pub address_num: String,
    pub address: String,
    pub address_detail: String,
    pub email: String,
    pub phone_num: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabilityPayload {
    pub disability_type: String,
    pub disability_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeteranPayload {
    pub veteran_no: String,
    pub veteran_ratio: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryPayload {
    pub status: String,
    pub service_type: String,
    pub branch: String,
    pub rank: String,
    pub military_start_date: String,
    pub military_end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInitResponse {
    pub id: i64,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}
