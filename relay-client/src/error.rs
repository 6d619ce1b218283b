//! Error types for the Relay client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the pipeline-runs API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request could not be built (bad URL, bad header value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if the service rejected the credential
    ///
    /// A bad or expired PAT is answered with 401/403, or with a 203 carrying
    /// the interactive sign-in page.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::ApiError { status: 401 | 403 | 203, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors() {
        assert!(ClientError::api_error(401, "unauthorized").is_auth_error());
        assert!(ClientError::api_error(203, "sign-in page").is_auth_error());
        assert!(!ClientError::api_error(404, "missing").is_auth_error());
    }

    #[test]
    fn test_non_api_errors_are_not_auth_errors() {
        assert!(!ClientError::api_error(503, "busy").is_auth_error());
        assert!(!ClientError::ParseError("bad json".into()).is_auth_error());
        assert!(!ClientError::InvalidRequest("bad url".into()).is_auth_error());
    }
}
