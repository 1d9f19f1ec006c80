#![allow(dead_code)]
use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Choice;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Parses a `YYYY-MM-DD` date as produced by a date input.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT).ok()
}

/// Start/end pair edited by a date range picker. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.start) && is_blank(&self.end)
    }

    pub fn is_complete(&self) -> bool {
        !is_blank(&self.start) && !is_blank(&self.end)
    }

    /// False only when both dates parse and the end precedes the start.
    pub fn is_ordered(&self) -> bool {
        match (parse_iso_date(&self.start), parse_iso_date(&self.end)) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }

    /// Read-only text shown under the picker.
    pub fn summary(&self) -> String {
        match (is_blank(&self.start), is_blank(&self.end)) {
            (true, true) => "없음".to_string(),
            (false, true) => format!("{} ~ (종료일 미선택)", self.start.trim()),
            (true, false) => format!("(시작일 미선택) ~ {}", self.end.trim()),
            (false, false) => format!("{} ~ {}", self.start.trim(), self.end.trim()),
        }
    }
}

/// One entry of a radio group or dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn options<C: Choice>() -> Vec<SelectOption> {
    C::ALL
        .iter()
        .map(|c| SelectOption {
            value: c.code(),
            label: c.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::member::{Gender, MilitaryStatus};

    #[test]
    fn test_blank_ignores_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" 홍 "));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2020-03-02"),
            NaiveDate::from_ymd_opt(2020, 3, 2)
        );
        assert_eq!(parse_iso_date("2020-02-30"), None);
        assert_eq!(parse_iso_date("2020/03/02"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn test_date_range_summary() {
        let mut range = DateRange::default();
        assert_eq!(range.summary(), "없음");

        range.start = "2020-03-02".to_string();
        assert_eq!(range.summary(), "2020-03-02 ~ (종료일 미선택)");
        assert!(!range.is_complete());

        range.end = "2021-09-01".to_string();
        assert_eq!(range.summary(), "2020-03-02 ~ 2021-09-01");
        assert!(range.is_complete());
    }

    #[test]
    fn test_date_range_order() {
        let range = DateRange {
            start: "2021-09-01".to_string(),
            end: "2020-03-02".to_string(),
        };
        assert!(!range.is_ordered());

        let partial = DateRange {
            start: "2021-09-01".to_string(),
            end: String::new(),
        };
        assert!(partial.is_ordered());
    }

    #[test]
    fn test_options_follow_declaration_order() {
        let genders = options::<Gender>();
        assert_eq!(
            genders,
            vec![
                SelectOption { value: "MALE", label: "남" },
                SelectOption { value: "FEMALE", label: "여" },
            ]
        );
        assert_eq!(options::<MilitaryStatus>().len(), 5);
    }
}
