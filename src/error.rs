//! Error handling for the Watson SDK core.
//!
//! One crate-wide error enum covers the whole call path: argument validation,
//! authentication, transport, HTTP-level service failures, and response
//! decoding. Nothing in this crate retries or swallows an error; every
//! failure surfaces to the caller as a `WatsonError`.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type WatsonResult<T> = Result<T, WatsonError>;

/// All failure modes of a Watson API call.
#[derive(Error, Debug, Clone)]
pub enum WatsonError {
    /// A required parameter was missing or empty. Raised before any network
    /// activity; the message names the offending parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Credentials were rejected or a token could not be obtained.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Connection-level failure with no HTTP response (refused connection,
    /// timeout, DNS, TLS).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The service returned a well-formed non-2xx HTTP response.
    #[error("Service error {status}: {message}")]
    ServiceError {
        /// HTTP status code of the error response.
        status: u16,
        /// Best-effort message parsed from the error body, or the canonical
        /// reason phrase when the body carries none.
        message: String,
        /// The raw error body, kept for diagnostics.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Decoding error: {0}")]
    DecodingError(String),

    /// A poll wait was cancelled through its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    /// A poll wait exceeded its wall-clock timeout.
    #[error("Operation timed out")]
    TimedOut,
}

impl WatsonError {
    /// Build an `InvalidArgument` error naming a missing required parameter.
    pub fn missing_param(name: &str) -> Self {
        Self::InvalidArgument(format!("required parameter `{name}` is missing or empty"))
    }

    /// Build a `ServiceError` from a status code and raw body, extracting a
    /// message field if the body is structured JSON.
    ///
    /// Watson services use both `{"message": …}` (Discovery, Speech) and
    /// `{"error": …}` (Assistant) shapes; both are recognized here.
    pub fn service_error(status: u16, body: &str, fallback: Option<&str>) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str().map(String::from))
            })
            .or_else(|| fallback.map(String::from))
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::ServiceError {
            status,
            message,
            body: body.to_string(),
        }
    }

    /// HTTP status code, when this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WatsonError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for WatsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodingError(err.to_string())
    }
}
