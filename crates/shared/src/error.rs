//! Error bodies returned by the summarization service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    EmptyText,
    NoWords,
}

/// JSON body sent alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// Reasons the service declines to summarize a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SummarizeRejection {
    #[error("text must not be empty")]
    EmptyText,
    #[error("text has no words to summarize")]
    NoWords,
}

impl SummarizeRejection {
    pub fn code(self) -> ErrorCode {
        match self {
            Self::EmptyText => ErrorCode::EmptyText,
            Self::NoWords => ErrorCode::NoWords,
        }
    }
}

impl From<SummarizeRejection> for ApiError {
    fn from(rejection: SummarizeRejection) -> Self {
        Self {
            code: rejection.code(),
            message: rejection.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_serializes_with_snake_case_code() {
        let body = serde_json::to_value(ApiError::from(SummarizeRejection::NoWords))
            .expect("json");
        assert_eq!(
            body,
            serde_json::json!({ "code": "no_words", "message": "text has no words to summarize" })
        );
    }
}
