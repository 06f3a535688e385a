//! Error types for the ExpenseLM SDK.

use expenselm_core::ValidationError;

/// Result type for SDK operations.
pub type ExpenseLmResult<T> = Result<T, ExpenseLmError>;

/// Error types that can occur when calling the ExpenseLM API.
///
/// Nothing is retried or swallowed: every variant reaches the caller as
/// soon as it happens.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseLmError {
    /// Missing or invalid local setup. Raised before any network I/O.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request did not complete (connection failure, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Response body does not match the expected shape.
    #[error("Invalid response: {0}")]
    Validation(#[from] ValidationError),

    /// Caller-supplied parameters rejected before sending.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ExpenseLmError {
    /// Whether the request was abandoned because it exceeded the timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(err) if err.is_timeout())
    }

    /// HTTP status of a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ExpenseLmError::Api {
            status: 404,
            body: r#"{"detail":"Not Found"}"#.to_string(),
        };

        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            r#"API error (status 404): {"detail":"Not Found"}"#
        );
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ExpenseLmError =
            ValidationError::new("[0].id", "missing field `id`").into();

        assert!(matches!(err, ExpenseLmError::Validation(ref v) if v.path == "[0].id"));
        assert!(err.status().is_none());
        assert!(!err.is_timeout());
    }
}
