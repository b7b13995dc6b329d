//! Authorization-code flow.

use url::Url;

use super::{AUTH_ENDPOINT, GMAIL_READONLY_SCOPE, OAuthClient, PkceChallenge};
use crate::error::Result;
use crate::token::Credential;

/// Authorization-code flow for `OAuth2`.
///
/// Built for the one-user web/desktop case: generate a consent URL, send
/// the user there, exchange the code that comes back on the redirect.
#[derive(Debug)]
pub struct AuthCodeFlow {
    client: OAuthClient,
    pkce: Option<PkceChallenge>,
}

impl AuthCodeFlow {
    /// Creates a new authorization-code flow.
    #[must_use]
    pub const fn new(client: OAuthClient) -> Self {
        Self { client, pkce: None }
    }

    /// Enables PKCE (recommended; Google accepts it for confidential
    /// clients too).
    #[must_use]
    pub fn with_pkce(mut self) -> Self {
        self.pkce = Some(PkceChallenge::generate());
        self
    }

    /// Builds the consent URL the user must visit.
    ///
    /// Always requests `access_type=offline` and `prompt=consent` so Google
    /// issues a refresh token, and scopes the grant to read-only Gmail.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be parsed.
    pub fn authorization_url(&self, state: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(AUTH_ENDPOINT)?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", &self.client.client_id)
                .append_pair("response_type", "code")
                .append_pair("scope", GMAIL_READONLY_SCOPE)
                .append_pair("access_type", "offline")
                .append_pair("prompt", "consent");

            if let Some(redirect_uri) = self.client.redirect_uri.as_deref() {
                pairs.append_pair("redirect_uri", redirect_uri);
            }

            if let Some(state_val) = state {
                pairs.append_pair("state", state_val);
            }

            if let Some(pkce) = &self.pkce {
                pairs
                    .append_pair("code_challenge", pkce.challenge())
                    .append_pair("code_challenge_method", pkce.method());
            }
        }

        Ok(url)
    }

    /// Exchanges the authorization code from the redirect for a credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the token exchange fails.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let verifier = self.pkce.as_ref().map(PkceChallenge::verifier);
        self.client.exchange_code(code, verifier).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> OAuthClient {
        OAuthClient::new("test_client", "test_secret")
            .with_redirect_uri("http://localhost:5000/api/auth/callback")
    }

    #[test]
    fn test_authorization_url() {
        let flow = AuthCodeFlow::new(client());
        let url = flow.authorization_url(Some("xyzzy")).unwrap();

        assert!(url.as_str().starts_with(AUTH_ENDPOINT));
        assert!(url.as_str().contains("client_id=test_client"));
        assert!(url.as_str().contains("response_type=code"));
        assert!(url.as_str().contains("access_type=offline"));
        assert!(url.as_str().contains("prompt=consent"));
        assert!(url.as_str().contains("state=xyzzy"));
        // URL-encoded redirect_uri
        assert!(
            url.as_str()
                .contains("redirect_uri=http%3A%2F%2Flocalhost%3A5000%2Fapi%2Fauth%2Fcallback")
        );
    }

    #[test]
    fn test_authorization_url_with_pkce() {
        let flow = AuthCodeFlow::new(client()).with_pkce();
        let url = flow.authorization_url(None).unwrap();

        assert!(url.as_str().contains("code_challenge="));
        assert!(url.as_str().contains("code_challenge_method=S256"));
    }

    #[test]
    fn test_gmail_scope_requested() {
        let flow = AuthCodeFlow::new(client());
        let url = flow.authorization_url(None).unwrap();

        let scope = url
            .query_pairs()
            .find(|(k, _)| k == "scope")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(scope, GMAIL_READONLY_SCOPE);
    }
}
