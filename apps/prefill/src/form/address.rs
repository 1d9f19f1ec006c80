#![allow(dead_code)]
use serde::{Deserialize, Serialize};

use crate::form::phone::only_digits;
use crate::postcode::LoadState;

const POSTAL_CODE_LEN: usize = 5;

/// Completion payload delivered by the postcode widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostcodeResult {
    pub zonecode: String,
    pub road_address: String,
    pub jibun_address: String,
    pub bname: String,
    pub building_name: String,
}

impl PostcodeResult {
    /// Road address (falling back to the lot address), annotated with the neighborhood and
    /// building name when either is present: `"<base> (<bname>, <building>)"`.
    pub fn base_address(&self) -> String {
        let base = if self.road_address.is_empty() {
            &self.jibun_address
        } else {
            &self.road_address
        };

        let extra = [self.bname.as_str(), self.building_name.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        if extra.is_empty() {
            base.clone()
        } else {
            format!("{base} ({extra})")
        }
    }
}

/// Where input focus should move after a UI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    DetailAddress,
}

pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == POSTAL_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// Address control: postal code and base address come from the lookup widget and are
/// read-only unless made editable; the detail address is always free text.
#[derive(Debug, Clone)]
pub struct AddressField {
    postal_code: String,
    base: String,
    detail: String,
    pub required: bool,
    pub editable_postal_code: bool,
    pub editable_base: bool,
    lookup_open: bool,
}

impl Default for AddressField {
    fn default() -> Self {
        Self {
            postal_code: String::new(),
            base: String::new(),
            detail: String::new(),
            required: true,
            editable_postal_code: false,
            editable_base: false,
            lookup_open: false,
        }
    }
}

impl AddressField {
    /// Allows typing postal code and base address by hand.
    pub fn editable(mut self) -> Self {
        self.editable_postal_code = true;
        self.editable_base = true;
        self
    }

    /// Opens or closes the lookup panel. Returns whether the panel is open afterwards;
    /// nothing happens until the widget script is ready.
    pub fn toggle_lookup(&mut self, widget: &LoadState) -> bool {
        if widget.is_ready() {
            self.lookup_open = !self.lookup_open;
        }
        self.lookup_open
    }

    pub fn is_lookup_open(&self) -> bool {
        self.lookup_open
    }

    /// Applies a widget selection and closes the panel.
    pub fn apply_selection(&mut self, result: &PostcodeResult) -> FocusTarget {
        self.postal_code = result.zonecode.clone();
        self.base = result.base_address();
        self.lookup_open = false;
        FocusTarget::DetailAddress
    }

    /// Manual postal code entry. Keeps digits only, at most five. Ignored while read-only.
    pub fn set_postal_code(&mut self, raw: &str) -> bool {
        if !self.editable_postal_code {
            return false;
        }
        let mut digits = only_digits(raw);
        digits.truncate(POSTAL_CODE_LEN);
        self.postal_code = digits;
        true
    }

    pub fn set_base(&mut self, raw: &str) -> bool {
        if !self.editable_base {
            return false;
        }
        self.base = raw.to_string();
        true
    }

    pub fn set_detail(&mut self, raw: &str) {
        self.detail = raw.to_string();
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn is_valid(&self) -> bool {
        if self.postal_code.is_empty() && self.base.trim().is_empty() {
            return !self.required;
        }
        is_valid_postal_code(&self.postal_code) && !self.base.trim().is_empty()
    }

    pub fn error(&self) -> Option<&'static str> {
        if !self.postal_code.is_empty() && !is_valid_postal_code(&self.postal_code) {
            Some("우편번호는 5자리 숫자여야 합니다.")
        } else if !self.is_valid() {
            Some("주소 찾기로 주소를 선택해 주세요.")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> PostcodeResult {
        PostcodeResult {
            zonecode: "06236".to_string(),
            road_address: "서울 강남구 테헤란로 152".to_string(),
            jibun_address: "서울 강남구 역삼동 737".to_string(),
            bname: "역삼동".to_string(),
            building_name: "강남파이낸스센터".to_string(),
        }
    }

    #[test]
    fn test_base_address_with_annotations() {
        assert_eq!(
            selection().base_address(),
            "서울 강남구 테헤란로 152 (역삼동, 강남파이낸스센터)"
        );
    }

    #[test]
    fn test_base_address_falls_back_to_lot_address() {
        let result = PostcodeResult {
            road_address: String::new(),
            building_name: String::new(),
            ..selection()
        };
        assert_eq!(result.base_address(), "서울 강남구 역삼동 737 (역삼동)");
    }

    #[test]
    fn test_base_address_without_annotations() {
        let result = PostcodeResult {
            bname: String::new(),
            building_name: String::new(),
            ..selection()
        };
        assert_eq!(result.base_address(), "서울 강남구 테헤란로 152");
    }

    #[test]
    fn test_widget_payload_is_camel_case() {
        let json = r#"{"zonecode":"06236","roadAddress":"A","jibunAddress":"B","bname":"","buildingName":"C","sido":"서울"}"#;
        let parsed: PostcodeResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.road_address, "A");
        assert_eq!(parsed.building_name, "C");
    }

    #[test]
    fn test_selection_fills_fields_and_focuses_detail() {
        let mut field = AddressField::default();
        assert!(field.toggle_lookup(&LoadState::Ready));

        let focus = field.apply_selection(&selection());
        assert_eq!(focus, FocusTarget::DetailAddress);
        assert_eq!(field.postal_code(), "06236");
        assert!(!field.is_lookup_open());
        assert!(field.is_valid());
    }

    #[test]
    fn test_lookup_needs_ready_widget() {
        let mut field = AddressField::default();
        assert!(!field.toggle_lookup(&LoadState::Loading));
        assert!(!field.toggle_lookup(&LoadState::Failed("boom".to_string())));
        assert!(field.toggle_lookup(&LoadState::Ready));
        assert!(!field.toggle_lookup(&LoadState::Ready));
    }

    #[test]
    fn test_read_only_fields_ignore_manual_input() {
        let mut field = AddressField::default();
        assert!(!field.set_postal_code("12345"));
        assert!(!field.set_base("somewhere"));
        assert_eq!(field.postal_code(), "");

        field.set_detail("101동 202호");
        assert_eq!(field.detail(), "101동 202호");
    }

    #[test]
    fn test_editable_postal_code_keeps_five_digits() {
        let mut field = AddressField::default().editable();
        assert!(field.set_postal_code("06-2367"));
        assert_eq!(field.postal_code(), "06236");
    }

    #[test]
    fn test_postal_code_validation() {
        assert!(is_valid_postal_code("06236"));
        assert!(!is_valid_postal_code("0623"));
        assert!(!is_valid_postal_code("06236 "));
        assert!(!is_valid_postal_code("０６２３６"));

        let mut field = AddressField::default().editable();
        field.set_postal_code("0623");
        field.set_base("서울");
        assert!(!field.is_valid());
        assert_eq!(field.error(), Some("우편번호는 5자리 숫자여야 합니다."));
    }
}
