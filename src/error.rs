//! Application Error
//!
//! What a form submit can fail with, shown inline next to the form.

use crate::api::ApiError;
use crate::upload::UploadError;
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AppError {
    /// Whether the request was never sent
    pub fn is_local(&self) -> bool {
        !matches!(self, AppError::Api(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn require(title: &str) -> Result<String, AppError> {
        Ok(crate::validation::require_title(title)?)
    }

    #[test]
    fn test_validation_converts() {
        let err = require("  ").unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
        assert!(err.is_local());
    }

    #[test]
    fn test_api_message_passes_through() {
        let err = AppError::from(ApiError::from_status(400, json!({ "message": "Bad title" })));
        assert_eq!(err.to_string(), "Bad title");
        assert!(!err.is_local());
    }

    #[test]
    fn test_upload_error_message() {
        let err = AppError::from(UploadError::NoFile);
        assert_eq!(err.to_string(), "No file selected");
    }
}
