//! Shared application state handed to every handler.

use std::sync::Arc;

use jobtrail_core::{AuthSession, CredentialRepository, JobRepository, Result, SyncEngine};

use crate::config::Settings;

/// Handles to the repositories and services behind the API.
#[derive(Clone)]
pub struct AppState {
    /// Job record store.
    pub jobs: Arc<JobRepository>,
    /// Gmail auth session.
    pub auth: Arc<AuthSession>,
    /// Mailbox sync engine.
    pub sync: Arc<SyncEngine>,
}

impl AppState {
    /// Builds state over the configured database and credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub async fn new(settings: &Settings) -> Result<Self> {
        let jobs = Arc::new(JobRepository::new(&settings.database_path).await?);
        let credentials = CredentialRepository::new(&settings.database_path).await?;
        let auth = Arc::new(AuthSession::new(
            &settings.google_credentials_path,
            credentials,
        ));
        let sync = Arc::new(SyncEngine::new(Arc::clone(&auth), Arc::clone(&jobs)));

        Ok(Self { jobs, auth, sync })
    }

    /// Builds state over in-memory stores, for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub async fn in_memory(google_credentials_path: &str) -> Result<Self> {
        let jobs = Arc::new(JobRepository::in_memory().await?);
        let credentials = CredentialRepository::in_memory().await?;
        let auth = Arc::new(AuthSession::new(google_credentials_path, credentials));
        let sync = Arc::new(SyncEngine::new(Arc::clone(&auth), Arc::clone(&jobs)));

        Ok(Self { jobs, auth, sync })
    }
}
