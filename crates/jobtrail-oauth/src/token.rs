//! Persisted `OAuth2` credential state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Refresh this many seconds before the reported expiry.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// A stored `OAuth2` credential: the access token plus everything needed
/// to refresh it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer access token.
    pub access_token: String,
    /// Refresh token, if the server granted offline access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Instant after which the access token is no longer valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Scope granted by the authorization server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Credential {
    /// Creates a credential from a token-endpoint response.
    #[must_use]
    pub fn from_response(response: TokenResponse) -> Self {
        let expires_at = response
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(i64::from(secs)));

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
            scope: response.scope,
        }
    }

    /// Whether the access token is expired (with a 60 second buffer).
    ///
    /// A credential without an expiry is treated as non-expiring.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + Duration::seconds(EXPIRY_BUFFER_SECS) >= exp)
    }

    /// Returns the refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRefreshToken`] when the server never granted one.
    pub fn refresh_token(&self) -> Result<&str> {
        self.refresh_token.as_deref().ok_or(Error::NoRefreshToken)
    }
}

/// Success response from the token endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u32>,
    /// Refresh token. Google only returns this on the first consent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Granted scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Error response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub error: String,
    /// Error description.
    #[serde(default)]
    pub error_description: String,
}

impl ErrorResponse {
    /// Converts to an [`Error`].
    #[must_use]
    pub fn into_error(self) -> Error {
        Error::oauth_error(self.error, self.error_description)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(expires_in: Option<u32>) -> TokenResponse {
        TokenResponse {
            access_token: "ya29.token".to_string(),
            expires_in,
            refresh_token: Some("1//refresh".to_string()),
            scope: Some("https://www.googleapis.com/auth/gmail.readonly".to_string()),
        }
    }

    #[test]
    fn test_credential_from_response() {
        let cred = Credential::from_response(response(Some(3600)));
        assert_eq!(cred.access_token, "ya29.token");
        assert!(cred.expires_at.is_some());
        assert!(!cred.is_expired());
        assert_eq!(cred.refresh_token().unwrap(), "1//refresh");
    }

    #[test]
    fn test_expiry_buffer() {
        let mut cred = Credential::from_response(response(None));
        assert!(!cred.is_expired());

        // Inside the 60s buffer counts as expired.
        cred.expires_at = Some(Utc::now() + Duration::seconds(30));
        assert!(cred.is_expired());

        cred.expires_at = Some(Utc::now() - Duration::seconds(120));
        assert!(cred.is_expired());
    }

    #[test]
    fn test_missing_refresh_token() {
        let cred = Credential::from_response(TokenResponse {
            access_token: "t".to_string(),
            expires_in: None,
            refresh_token: None,
            scope: None,
        });
        assert!(matches!(
            cred.refresh_token(),
            Err(Error::NoRefreshToken)
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let cred = Credential::from_response(response(Some(3600)));
        let json = serde_json::to_string(&cred).unwrap();
        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(back.access_token, cred.access_token);
        assert_eq!(back.refresh_token, cred.refresh_token);
    }
}
