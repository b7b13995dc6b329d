//! Loading of the Google client-credentials file.
//!
//! This is the `credentials.json` downloaded from the Google Cloud console
//! when an `OAuth2` client is created. Google wraps the client config in an
//! `installed` key for desktop clients and a `web` key for web clients;
//! both shapes are accepted.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Application `OAuth2` credentials issued by Google.
#[derive(Debug, Clone, Deserialize)]
pub struct AppCredentials {
    /// Client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
    /// Registered redirect URIs; the first one is used.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

/// Wire shape of the downloaded credentials file.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<AppCredentials>,
    web: Option<AppCredentials>,
}

impl AppCredentials {
    /// Loads client credentials from a Google `credentials.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the file does not exist, and
    /// I/O or JSON errors if it cannot be read or parsed. A file without
    /// an `installed` or `web` section is rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InvalidConfig(format!(
                "client credentials file not found: {}",
                path.display()
            )));
        }

        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses client credentials from the raw JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or carries neither an
    /// `installed` nor a `web` client section.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: CredentialsFile = serde_json::from_str(raw)?;
        file.installed.or(file.web).ok_or_else(|| {
            Error::InvalidConfig("credentials file has no 'installed' or 'web' section".into())
        })
    }

    /// The redirect URI to use for the authorization-code flow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if no redirect URI is registered.
    pub fn redirect_uri(&self) -> Result<&str> {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .ok_or_else(|| Error::InvalidConfig("no redirect_uris in credentials file".into()))
    }
}
