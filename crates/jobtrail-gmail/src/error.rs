//! Error types for Gmail API operations.

use thiserror::Error;

/// Result type alias for Gmail API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the Gmail API.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The access token was rejected (HTTP 401/403).
    #[error("Gmail rejected the access token (HTTP {0})")]
    Unauthorized(u16),

    /// Any other non-success API response.
    #[error("Gmail API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the API error body, or the status line.
        message: String,
    },
}

impl Error {
    /// Whether this error means re-authentication is required.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
