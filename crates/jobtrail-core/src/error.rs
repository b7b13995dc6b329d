//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// `OAuth2` operation failed.
    #[error("OAuth error: {0}")]
    OAuth(#[from] jobtrail_oauth::Error),

    /// Gmail API call failed.
    #[error("Gmail error: {0}")]
    Gmail(#[from] jobtrail_gmail::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Job record not found.
    #[error("Job not found: {0}")]
    JobNotFound(i64),

    /// Application credentials missing or unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No stored Gmail credential; the user must authenticate first.
    #[error("Not authenticated with Gmail")]
    NotAuthenticated,

    /// The stored grant was rejected; the user must re-authenticate.
    #[error("Authentication expired. Please re-authenticate with Gmail.")]
    AuthExpired,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
