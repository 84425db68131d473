//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No response was obtained (connection refused, DNS, TLS, reset...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A response was obtained but its status was not 2xx.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not what the caller expected.
    #[error("Failed to parse response: {0}")]
    Deserialization(String),
}

impl FetchError {
    /// The HTTP status code, if a response was obtained.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}
