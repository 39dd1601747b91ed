//! Error types for service calls.

use thiserror::Error;

/// Errors from a verification request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The service answered with a status other than 200.
    #[error("Statuscode {code}: {reason}")]
    Status {
        /// Numeric HTTP status.
        code: u16,
        /// Canonical reason phrase, empty when the status has none.
        reason: String,
    },

    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not a result set.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The configured base URL cannot be used.
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Returns the message shown inline next to the submit control.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { .. } => self.to_string(),
            Self::Network(detail) => format!("Could not reach the validation service: {detail}"),
            Self::Decode(_) => "The validation service sent a response that could not be read."
                .to_string(),
            Self::InvalidUrl(url) => format!("The service URL '{url}' is not valid."),
        }
    }

    /// Returns whether submitting again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { code, .. } => *code >= 500 || *code == 429,
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
