#![allow(dead_code)]
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Korean mobile numbers are at most 11 digits.
pub const DEFAULT_MAX_DIGITS: usize = 11;

const REQUIRED_MESSAGE: &str = "휴대폰 번호를 입력해 주세요.";
const FORMAT_MESSAGE: &str = "휴대폰 번호 형식을 확인해 주세요. 예) 010-1234-5678";

static MOBILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:010[0-9]{8}|01[1-9][0-9]{7,8})$").expect("mobile pattern is valid")
});

pub fn only_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `010` + 8 digits, or another `01[1-9]` prefix + 7 or 8 digits.
pub fn is_valid_korean_mobile(digits: &str) -> bool {
    MOBILE_PATTERN.is_match(digits)
}

/// Formats a (possibly partial) number as the user types.
///
/// `010` numbers group 3-4-4. Other `01[1-9]` numbers group 3-3-4 at ten digits and 3-4-4
/// otherwise. Anything else is returned as bare digits.
pub fn format_korean_mobile(input: &str) -> String {
    let mut d = only_digits(input);
    d.truncate(DEFAULT_MAX_DIGITS);
    let len = d.len();

    if d.starts_with("010") {
        return match len {
            0..=3 => d,
            4..=7 => format!("{}-{}", &d[..3], &d[3..]),
            _ => format!("{}-{}-{}", &d[..3], &d[3..7], &d[7..]),
        };
    }

    if has_other_mobile_prefix(&d) {
        return match len {
            0..=3 => d,
            4..=7 => format!("{}-{}", &d[..3], &d[3..]),
            10 => format!("{}-{}-{}", &d[..3], &d[3..6], &d[6..]),
            _ => format!("{}-{}-{}", &d[..3], &d[3..7], &d[7..]),
        };
    }

    d
}

fn has_other_mobile_prefix(digits: &str) -> bool {
    let b = digits.as_bytes();
    b.len() >= 3 && b[0] == b'0' && b[1] == b'1' && (b'1'..=b'9').contains(&b[2])
}

/// Which representation the form stores for the phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    #[default]
    Digits,
    Formatted,
}

#[derive(Debug, Error)]
#[error("unknown phone store mode '{0}' (expected 'digits' or 'formatted')")]
pub struct UnknownStoreMode(String);

impl FromStr for StoreMode {
    type Err = UnknownStoreMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "digits" => Ok(StoreMode::Digits),
            "formatted" => Ok(StoreMode::Formatted),
            _ => Err(UnknownStoreMode(s.to_string())),
        }
    }
}

/// Phone number control. Keeps the raw digits and derives the formatted display text.
#[derive(Debug, Clone)]
pub struct PhoneField {
    digits: String,
    touched: bool,
    error: Option<&'static str>,
    pub required: bool,
    pub store_mode: StoreMode,
    pub max_digits: usize,
}

impl Default for PhoneField {
    fn default() -> Self {
        Self::new(true, StoreMode::Digits)
    }
}

impl PhoneField {
    pub fn new(required: bool, store_mode: StoreMode) -> Self {
        Self {
            digits: String::new(),
            touched: false,
            error: None,
            required,
            store_mode,
            max_digits: DEFAULT_MAX_DIGITS,
        }
    }

    pub fn with_max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    /// Handles one keystroke's worth of input and returns the recomputed validity.
    /// Once the field has been blurred, every input also refreshes the error message.
    pub fn input(&mut self, raw: &str) -> bool {
        let mut digits = only_digits(raw);
        digits.truncate(self.max_digits);
        self.digits = digits;
        if self.touched {
            self.validate();
        }
        self.is_valid()
    }

    pub fn blur(&mut self) -> bool {
        self.touched = true;
        self.validate()
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn formatted(&self) -> String {
        format_korean_mobile(&self.digits)
    }

    /// The value written into canonical form state.
    pub fn stored_value(&self) -> String {
        match self.store_mode {
            StoreMode::Digits => self.digits.clone(),
            StoreMode::Formatted => self.formatted(),
        }
    }

    pub fn is_valid(&self) -> bool {
        if self.digits.is_empty() {
            return !self.required;
        }
        is_valid_korean_mobile(&self.digits)
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    fn validate(&mut self) -> bool {
        self.error = if self.required && self.digits.is_empty() {
            Some(REQUIRED_MESSAGE)
        } else if !self.digits.is_empty() && !is_valid_korean_mobile(&self.digits) {
            Some(FORMAT_MESSAGE)
        } else {
            None
        };
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_mode_from_str() {
        assert_eq!("digits".parse::<StoreMode>().unwrap(), StoreMode::Digits);
        assert_eq!(" Formatted ".parse::<StoreMode>().unwrap(), StoreMode::Formatted);
        assert!("dashes".parse::<StoreMode>().is_err());
    }

    #[test]
    fn test_format_010_progressively() {
        assert_eq!(format_korean_mobile("010"), "010");
        assert_eq!(format_korean_mobile("0101"), "010-1");
        assert_eq!(format_korean_mobile("0101234"), "010-1234");
        assert_eq!(format_korean_mobile("01012345"), "010-1234-5");
        assert_eq!(format_korean_mobile("01012345678"), "010-1234-5678");
    }

    #[test]
    fn test_format_010_keeps_digit_groups() {
        for tail in ["00000000", "98765432", "13572468"] {
            let digits = format!("010{tail}");
            let expected = format!("010-{}-{}", &tail[..4], &tail[4..]);
            assert_eq!(format_korean_mobile(&digits), expected);
        }
    }

    #[test]
    fn test_format_other_prefixes() {
        assert_eq!(format_korean_mobile("0111234567"), "011-123-4567");
        assert_eq!(format_korean_mobile("01612345678"), "016-1234-5678");
        assert_eq!(format_korean_mobile("019123"), "019-123");
        assert_eq!(format_korean_mobile("0191234"), "019-1234");
    }

    #[test]
    fn test_format_strips_and_truncates() {
        assert_eq!(format_korean_mobile("010-1234-5678-99"), "010-1234-5678");
        assert_eq!(format_korean_mobile("02 123 4567"), "021234567");
    }

    #[test]
    fn test_valid_korean_mobile() {
        assert!(is_valid_korean_mobile("01012345678"));
        assert!(is_valid_korean_mobile("0111234567"));
        assert!(is_valid_korean_mobile("01912345678"));
        assert!(!is_valid_korean_mobile("0101234567"));
        assert!(!is_valid_korean_mobile("010123456789"));
        assert!(!is_valid_korean_mobile("0212345678"));
        assert!(!is_valid_korean_mobile("011123456"));
        assert!(!is_valid_korean_mobile("010-1234-5678"));
        assert!(!is_valid_korean_mobile(""));
    }

    #[test]
    fn test_input_strips_non_digits_and_caps_length() {
        let mut field = PhoneField::default();
        assert!(field.input("010-1234-5678 999"));
        assert_eq!(field.digits(), "01012345678");
        assert_eq!(field.formatted(), "010-1234-5678");
    }

    #[test]
    fn test_custom_max_digits() {
        let mut field = PhoneField::default().with_max_digits(10);
        assert!(field.input("01112345678"));
        assert_eq!(field.digits(), "0111234567");
    }

    #[test]
    fn test_store_mode() {
        let mut digits = PhoneField::new(true, StoreMode::Digits);
        digits.input("01012345678");
        assert_eq!(digits.stored_value(), "01012345678");

        let mut formatted = PhoneField::new(true, StoreMode::Formatted);
        formatted.input("01012345678");
        assert_eq!(formatted.stored_value(), "010-1234-5678");
    }

    #[test]
    fn test_error_only_after_blur() {
        let mut field = PhoneField::default();
        assert!(!field.input("0101"));
        assert_eq!(field.error(), None);

        assert!(!field.blur());
        assert_eq!(field.error(), Some(FORMAT_MESSAGE));

        assert!(field.input("01012345678"));
        assert_eq!(field.error(), None);

        field.input("");
        assert_eq!(field.error(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_empty_optional_is_valid() {
        let mut field = PhoneField::new(false, StoreMode::Digits);
        assert!(field.is_valid());
        assert!(field.blur());
        assert_eq!(field.error(), None);
    }
}
