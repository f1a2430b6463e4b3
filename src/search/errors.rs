use crate::models::ApiErrorBody;
use thiserror::Error;

pub const INVALID_QUERY: &str = "Invalid search query. Please try again with different terms.";
pub const NOT_FOUND: &str = "Property not found";
pub const RATE_LIMITED: &str = "Too many requests. Please wait a moment and try again.";
pub const UNAVAILABLE: &str = "Search service is temporarily unavailable. Please try again later.";
pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
pub const COMPARE_TOO_FEW: &str = "At least 2 properties required for comparison";
pub const COMPARE_TOO_MANY: &str = "Maximum 5 properties can be compared";

/// Backend messages that may be shown to the user verbatim.
pub const SAFE_MESSAGES: &[&str] = &[
    INVALID_QUERY,
    RATE_LIMITED,
    UNAVAILABLE,
    UNEXPECTED,
    COMPARE_TOO_FEW,
    COMPARE_TOO_MANY,
    NOT_FOUND,
];

/// Failure talking to the search backend
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("backend returned HTTP {status}")]
    Status {
        status: u16,
        body: Option<ApiErrorBody>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Rejected before any request was sent
    #[error("invalid request: {0}")]
    Rejected(&'static str),
}

impl SearchError {
    /// Build a status error from a raw response body, which may not be JSON.
    pub fn from_response(status: u16, body: &str) -> Self {
        SearchError::Status {
            status,
            body: serde_json::from_str(body).ok(),
        }
    }

    /// The user-facing message. Never contains raw backend text unless that
    /// text is one of [`SAFE_MESSAGES`].
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::Status { status, body } => status_message(*status, body.as_ref()),
            SearchError::Rejected(message) => *message,
            SearchError::Transport(_) | SearchError::Decode(_) => UNEXPECTED,
        }
    }
}

fn status_message(status: u16, body: Option<&ApiErrorBody>) -> &'static str {
    match status {
        400 => body
            .and_then(|b| safe_message(&b.message))
            .unwrap_or(INVALID_QUERY),
        404 => NOT_FOUND,
        429 => RATE_LIMITED,
        503 => UNAVAILABLE,
        _ => UNEXPECTED,
    }
}

/// Look up a message in the whitelist.
pub fn safe_message(message: &str) -> Option<&'static str> {
    SAFE_MESSAGES.iter().copied().find(|m| *m == message)
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (404, NOT_FOUND),
            (429, RATE_LIMITED),
            (503, UNAVAILABLE),
            (500, UNEXPECTED),
            (502, UNEXPECTED),
            (418, UNEXPECTED),
        ];
        for (status, expected) in cases {
            assert_eq!(SearchError::from_response(status, "").user_message(), expected);
        }
    }

    #[test]
    fn test_400_passes_whitelisted_message() {
        let body = r#"{"error": true, "message": "Maximum 5 properties can be compared", "type": "X"}"#;
        assert_eq!(
            SearchError::from_response(400, body).user_message(),
            COMPARE_TOO_MANY
        );
    }

    #[test]
    fn test_400_hides_raw_message() {
        let body = r#"{"error": true, "message": "Invalid input: query: field required", "type": "ValidationError"}"#;
        assert_eq!(SearchError::from_response(400, body).user_message(), INVALID_QUERY);
        assert_eq!(SearchError::from_response(400, "<html>").user_message(), INVALID_QUERY);
    }

    #[test]
    fn test_500_never_leaks_backend_text() {
        let body = r#"{"error": true, "message": "Property not found", "type": "X"}"#;
        assert_eq!(SearchError::from_response(500, body).user_message(), UNEXPECTED);
    }

    #[test]
    fn test_transport_is_unexpected() {
        let err = SearchError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), UNEXPECTED);
    }
}
