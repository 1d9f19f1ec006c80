use serde::Deserialize;
use serde_json::Value;

use super::{ApiError, ApiErrorKind};

/// Structured error body returned by the backend on a non-success status.
///
/// Accepts both the flat `{ code, message, details }` shape and the same fields nested under
/// an `error` key.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<Value>,
    #[serde(default)]
    error: Option<Box<ErrorBody>>,
}

impl ErrorBody {
    pub fn into_api_error(self, status: u16, status_text: String) -> ApiError {
        let ErrorBody {
            code,
            message,
            details,
            error,
        } = self;
        let nested = error.map(|e| *e).unwrap_or_default();

        ApiError {
            kind: ApiErrorKind::Http,
            status,
            code: code.or(nested.code).and_then(code_to_string),
            message: message.or(nested.message).unwrap_or(status_text),
            details: details.or(nested.details).filter(|d| !d.is_null()),
        }
    }
}

// Codes arrive as strings from most services but some send numeric codes.
fn code_to_string(code: Value) -> Option<String> {
    match code {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ApiError {
        serde_json::from_value::<ErrorBody>(value)
            .unwrap()
            .into_api_error(400, "Bad Request".to_string())
    }

    #[test]
    fn test_flat_body() {
        let err = parse(json!({
            "code": "DUPLICATE_MEMBER",
            "message": "이미 등록된 회원입니다.",
            "details": { "field": "email" }
        }));
        assert_eq!(err.status, 400);
        assert_eq!(err.code.as_deref(), Some("DUPLICATE_MEMBER"));
        assert_eq!(err.message, "이미 등록된 회원입니다.");
        assert_eq!(err.details, Some(json!({ "field": "email" })));
    }

    #[test]
    fn test_nested_error_body() {
        let err = parse(json!({
            "error": { "code": "VALIDATION_ERROR", "message": "email is invalid" }
        }));
        assert_eq!(err.code.as_deref(), Some("VALIDATION_ERROR"));
        assert_eq!(err.message, "email is invalid");
        assert_eq!(err.details, None);
    }

    #[test]
    fn test_missing_message_falls_back_to_status_text() {
        let err = parse(json!({ "code": 4001 }));
        assert_eq!(err.code.as_deref(), Some("4001"));
        assert_eq!(err.message, "Bad Request");
    }
}
