//! API Error
//!
//! Every failure the client reports has the same shape: a human readable
//! message, the HTTP status when one was received, and the parsed body.

use serde_json::Value;

/// Generic message for failures that never produced a usable response
pub const GENERIC_MESSAGE: &str = "API request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Server answered with a non-2xx status
    Status,
    /// Request never completed (network, CORS, aborted)
    Transport,
    /// Response body was not the JSON we expected
    Decode,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    /// Parsed response body, `Null` when there was none
    pub body: Value,
    /// Description of the underlying failure, if any
    pub detail: Option<String>,
}

impl ApiError {
    /// Build the error for a non-2xx response
    ///
    /// The message comes from the body's `message` field, then its `error`
    /// field, then a generated one naming the status.
    pub fn from_status(status: u16, body: Value) -> Self {
        let message = body_message(&body, "message")
            .or_else(|| body_message(&body, "error"))
            .unwrap_or_else(|| format!("API request failed with status {}", status));

        Self {
            kind: ErrorKind::Status,
            message,
            status: Some(status),
            body,
            detail: None,
        }
    }

    pub fn transport(detail: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: GENERIC_MESSAGE.to_string(),
            status: None,
            body: Value::Null,
            detail: Some(detail.to_string()),
        }
    }

    pub fn decode(status: Option<u16>, detail: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: GENERIC_MESSAGE.to_string(),
            status,
            body: Value::Null,
            detail: Some(detail.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Level the client logs this failure at; a missing project is routine
    pub fn log_level(&self) -> log::Level {
        if self.is_not_found() {
            log::Level::Debug
        } else {
            log::Level::Error
        }
    }
}

fn body_message(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_field_wins() {
        let err = ApiError::from_status(400, json!({ "message": "X", "error": "Y" }));
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.body["error"], "Y");
    }

    #[test]
    fn test_error_field_fallback() {
        let err = ApiError::from_status(409, json!({ "error": "Conflict" }));
        assert_eq!(err.message, "Conflict");
    }

    #[test]
    fn test_generated_message() {
        let err = ApiError::from_status(503, json!({ "detail": "down" }));
        assert_eq!(err.message, "API request failed with status 503");

        let err = ApiError::from_status(500, Value::Null);
        assert_eq!(err.message, "API request failed with status 500");
    }

    #[test]
    fn test_non_string_message_ignored() {
        let err = ApiError::from_status(422, json!({ "message": { "field": "title" } }));
        assert_eq!(err.message, "API request failed with status 422");
    }

    #[test]
    fn test_not_found() {
        assert!(ApiError::from_status(404, Value::Null).is_not_found());
        assert!(!ApiError::transport("offline").is_not_found());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(ApiError::from_status(404, Value::Null).log_level(), log::Level::Debug);
        assert_eq!(ApiError::from_status(500, Value::Null).log_level(), log::Level::Error);
        assert_eq!(ApiError::transport("offline").log_level(), log::Level::Error);
        assert_eq!(ApiError::decode(Some(200), "bad").log_level(), log::Level::Error);
    }
}
