use thiserror::Error;

use crate::form::{DraftError, SubmitRejection};
use crate::http_client::ApiError;

/// Application-level error type returned by the CLI commands.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    #[error("Submit rejected: {0}")]
    Rejected(#[from] SubmitRejection),

    #[error("API error (status {}): {}", .0.status, .0.message)]
    Api(#[from] ApiError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit code: 2 for input problems the user can fix, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Draft(_) | AppError::Rejected(_) => 2,
            AppError::Api(_) | AppError::Internal(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Requirement;

    #[test]
    fn test_exit_codes() {
        let rejected: AppError = SubmitRejection::Blocked(vec![Requirement::Email]).into();
        assert_eq!(rejected.exit_code(), 2);

        let api: AppError = ApiError::timeout().into();
        assert_eq!(api.exit_code(), 1);
        assert_eq!(api.to_string(), "API error (status 0): Request timeout");
    }
}
