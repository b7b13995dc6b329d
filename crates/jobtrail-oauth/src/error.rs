//! Error types for `OAuth2` operations.

use std::io;

/// Result type alias for `OAuth2` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `OAuth2` error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error (reading the client-credentials file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `OAuth2` error reported by the authorization server.
    #[error("OAuth2 error: {error} - {description}")]
    OAuth {
        /// Error code (e.g., `invalid_grant`).
        error: String,
        /// Human-readable description.
        description: String,
    },

    /// No refresh token available for an expired credential.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Invalid token response.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl Error {
    /// Creates an OAuth error from error code and description.
    #[must_use]
    pub fn oauth_error(error: impl Into<String>, description: impl Into<String>) -> Self {
        Self::OAuth {
            error: error.into(),
            description: description.into(),
        }
    }

    /// Whether this error means the stored grant is no longer usable and
    /// the user has to authorize again.
    ///
    /// Covers the server's `invalid_grant` code as well as HTTP 401
    /// responses from resource endpoints.
    #[must_use]
    pub fn is_invalid_grant(&self) -> bool {
        match self {
            Self::OAuth { error, .. } => error == "invalid_grant",
            Self::Http(e) => e
                .status()
                .is_some_and(|s| s == reqwest::StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grant_detection() {
        let err = Error::oauth_error("invalid_grant", "Token has been expired or revoked.");
        assert!(err.is_invalid_grant());

        let err = Error::oauth_error("invalid_request", "Missing parameter");
        assert!(!err.is_invalid_grant());

        assert!(!Error::NoRefreshToken.is_invalid_grant());
    }
}
