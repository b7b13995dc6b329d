//! Auth session: the Gmail credential lifecycle as an explicit object.
//!
//! One session is shared by the API layer and the sync engine. It owns
//! the path to the application credentials file, the persisted user
//! credential, and the in-flight authorization flow between the consent
//! URL being issued and the redirect coming back.

use std::path::{Path, PathBuf};

use jobtrail_oauth::{AppCredentials, AuthCodeFlow, Error as OAuthError, OAuthClient};
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use crate::credential::CredentialRepository;
use crate::error::{Error, Result};

/// Snapshot of the authentication state, as reported to the dashboard.
#[derive(Debug, Clone)]
pub struct AuthStatus {
    /// Whether a usable credential is stored.
    pub authenticated: bool,
    /// Why not, when one isn't.
    pub error: Option<String>,
}

/// The `OAuth2` session threaded through API and sync calls.
pub struct AuthSession {
    credentials_path: PathBuf,
    store: CredentialRepository,
    /// Flow issued by `begin_authorization`, consumed by the callback.
    pending: Mutex<Option<AuthCodeFlow>>,
}

impl AuthSession {
    /// Creates a session over the application credentials file and the
    /// credential store.
    #[must_use]
    pub fn new(credentials_path: impl Into<PathBuf>, store: CredentialRepository) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            store,
            pending: Mutex::new(None),
        }
    }

    /// Path of the application credentials file.
    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Verifies the application credentials file is present and readable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when it isn't.
    pub fn ensure_configured(&self) -> Result<()> {
        self.oauth_client().map(|_| ())
    }

    /// Starts the authorization-code flow and returns the consent URL.
    ///
    /// The flow (and its PKCE verifier) is retained for the callback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when application credentials are missing.
    pub async fn begin_authorization(&self) -> Result<Url> {
        let flow = AuthCodeFlow::new(self.oauth_client()?).with_pkce();
        let url = flow.authorization_url(None)?;
        *self.pending.lock().await = Some(flow);
        debug!("authorization requested");
        Ok(url)
    }

    /// Exchanges the redirect code and persists the credential.
    ///
    /// Uses the pending flow when one exists; a callback arriving with no
    /// pending flow (the process restarted in between) falls back to a
    /// PKCE-less exchange.
    ///
    /// # Errors
    ///
    /// Returns an error when the exchange is rejected or the store fails.
    pub async fn complete_authorization(&self, code: &str) -> Result<()> {
        let pending = self.pending.lock().await.take();
        let flow = match pending {
            Some(flow) => flow,
            None => AuthCodeFlow::new(self.oauth_client()?),
        };

        let credential = flow.exchange_code(code).await?;
        self.store.save(&credential).await?;
        info!("Gmail credential stored");
        Ok(())
    }

    /// Produces a fresh access token, refreshing the stored credential in
    /// place when it has expired.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] when nothing is stored
    /// - [`Error::Config`] when a refresh is needed but application
    ///   credentials are missing
    /// - [`Error::AuthExpired`] when the grant is no longer usable; the
    ///   stored credential is deleted first
    pub async fn access_token(&self) -> Result<String> {
        let Some(credential) = self.store.load().await? else {
            return Err(Error::NotAuthenticated);
        };

        if !credential.is_expired() {
            return Ok(credential.access_token);
        }

        let client = self.oauth_client()?;
        match client.refresh(&credential).await {
            Ok(refreshed) => {
                let token = refreshed.access_token.clone();
                self.store.save(&refreshed).await?;
                debug!("access token refreshed");
                Ok(token)
            }
            Err(e) if e.is_invalid_grant() => {
                self.store.delete().await?;
                info!("stored grant rejected; credential deleted");
                Err(Error::AuthExpired)
            }
            Err(OAuthError::NoRefreshToken) => {
                self.store.delete().await?;
                Err(Error::AuthExpired)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reports whether a usable credential is stored.
    ///
    /// Never fails; failures to obtain a token are folded into the
    /// returned status.
    pub async fn status(&self) -> AuthStatus {
        match self.access_token().await {
            Ok(_) => AuthStatus {
                authenticated: true,
                error: None,
            },
            Err(Error::NotAuthenticated) => AuthStatus {
                authenticated: false,
                error: None,
            },
            Err(Error::AuthExpired) => AuthStatus {
                authenticated: false,
                error: Some("Token expired".to_string()),
            },
            Err(e) => AuthStatus {
                authenticated: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// Deletes the stored credential (provider rejected it mid-use).
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn invalidate(&self) -> Result<()> {
        self.store.delete().await
    }

    /// Revokes authentication: clears the pending flow and deletes the
    /// stored credential.
    ///
    /// Returns whether a credential was actually revoked; revoking with
    /// nothing stored is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn revoke(&self) -> Result<bool> {
        self.pending.lock().await.take();

        let had_credential = self.store.load().await?.is_some();
        if had_credential {
            self.store.delete().await?;
            info!("Gmail credential revoked");
        }
        Ok(had_credential)
    }

    fn oauth_client(&self) -> Result<OAuthClient> {
        let app = AppCredentials::load(&self.credentials_path).map_err(|e| match e {
            OAuthError::InvalidConfig(msg) => Error::Config(msg),
            other => Error::OAuth(other),
        })?;
        Ok(OAuthClient::from_app_credentials(&app))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jobtrail_oauth::Credential;

    async fn session() -> AuthSession {
        AuthSession::new(
            "/nonexistent/credentials.json",
            CredentialRepository::in_memory().await.unwrap(),
        )
    }

    fn valid_credential() -> Credential {
        Credential {
            access_token: "ya29.live".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            scope: None,
        }
    }

    #[tokio::test]
    async fn test_status_unauthenticated_when_store_empty() {
        let session = session().await;

        let status = session.status().await;
        assert!(!status.authenticated);
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn test_access_token_requires_credential() {
        let session = session().await;
        assert!(matches!(
            session.access_token().await,
            Err(Error::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_access_token_returns_valid_token_without_refresh() {
        let session = session().await;
        session.store.save(&valid_credential()).await.unwrap();

        // No refresh needed, so the missing credentials file never matters.
        let token = session.access_token().await.unwrap();
        assert_eq!(token, "ya29.live");
        assert!(session.status().await.authenticated);
    }

    #[tokio::test]
    async fn test_expired_credential_needs_app_credentials() {
        let session = session().await;
        let mut credential = valid_credential();
        credential.expires_at = Some(Utc::now() - Duration::hours(1));
        session.store.save(&credential).await.unwrap();

        assert!(matches!(
            session.access_token().await,
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_begin_authorization_fails_fast_without_config() {
        let session = session().await;
        assert!(matches!(
            session.begin_authorization().await,
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_revoke_is_noop_without_credential() {
        let session = session().await;
        assert!(!session.revoke().await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_deletes_credential() {
        let session = session().await;
        session.store.save(&valid_credential()).await.unwrap();

        assert!(session.revoke().await.unwrap());
        assert!(!session.status().await.authenticated);
        // Second revoke is the no-op case.
        assert!(!session.revoke().await.unwrap());
    }
}
