//! `OAuth2` authorization flow against Google's endpoints.

mod code;
mod pkce;

pub use code::AuthCodeFlow;
pub use pkce::PkceChallenge;

use std::collections::HashMap;

use reqwest::Client;
use tracing::debug;

use crate::credentials::AppCredentials;
use crate::error::Result;
use crate::token::{Credential, ErrorResponse, TokenResponse};

/// Google's authorization endpoint.
pub const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's token endpoint.
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Scope for read-only mailbox access.
pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// `OAuth2` client configuration plus the HTTP client used for
/// token-endpoint calls.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    /// Client ID issued by Google.
    pub client_id: String,
    /// Client secret issued by Google.
    pub client_secret: String,
    /// Redirect URI registered for the client.
    pub redirect_uri: Option<String>,
    http_client: Client,
}

impl OAuthClient {
    /// Creates a new OAuth client.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            http_client: Client::new(),
        }
    }

    /// Creates a client from a loaded credentials file, picking the first
    /// registered redirect URI when one exists.
    #[must_use]
    pub fn from_app_credentials(app: &AppCredentials) -> Self {
        let mut client = Self::new(&app.client_id, &app.client_secret);
        client.redirect_uri = app.redirect_uris.first().cloned();
        client
    }

    /// Sets the redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Obtains a fresh credential using the stored refresh token.
    ///
    /// Google omits the refresh token from refresh responses; the previous
    /// one is carried over so the credential stays refreshable.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential has no refresh token or the
    /// server rejects the request (`invalid_grant` when revoked/expired).
    pub async fn refresh(&self, credential: &Credential) -> Result<Credential> {
        let refresh_token = credential.refresh_token()?;

        let mut params = HashMap::new();
        params.insert("grant_type", "refresh_token");
        params.insert("refresh_token", refresh_token);
        params.insert("client_id", &self.client_id);
        params.insert("client_secret", &self.client_secret);

        debug!("refreshing access token");
        let response = self.post_token_endpoint(&params).await?;

        let mut refreshed = Credential::from_response(response);
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token.clone_from(&credential.refresh_token);
        }

        Ok(refreshed)
    }

    /// Exchanges an authorization code for a credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails.
    pub(crate) async fn exchange_code(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<Credential> {
        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("client_id", &self.client_id);
        params.insert("client_secret", &self.client_secret);

        if let Some(uri) = self.redirect_uri.as_deref() {
            params.insert("redirect_uri", uri);
        }
        if let Some(verifier) = code_verifier {
            params.insert("code_verifier", verifier);
        }

        debug!("exchanging authorization code");
        let response = self.post_token_endpoint(&params).await?;
        Ok(Credential::from_response(response))
    }

    /// POSTs a form to the token endpoint and decodes success or the
    /// server's `{error, error_description}` shape.
    async fn post_token_endpoint(
        &self,
        params: &HashMap<&str, &str>,
    ) -> Result<TokenResponse> {
        let response = self
            .http_client
            .post(TOKEN_ENDPOINT)
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error: ErrorResponse = response.json().await?;
            return Err(error.into_error());
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OAuthClient::new("id", "secret");
        assert_eq!(client.client_id, "id");
        assert!(client.redirect_uri.is_none());
    }

    #[test]
    fn test_client_from_app_credentials() {
        let app = AppCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uris: vec!["http://localhost:5000/api/auth/callback".to_string()],
        };

        let client = OAuthClient::from_app_credentials(&app);
        assert_eq!(
            client.redirect_uri.as_deref(),
            Some("http://localhost:5000/api/auth/callback")
        );
    }
}
