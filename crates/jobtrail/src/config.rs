//! Server settings, sourced from the environment.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings, read from `JOBTRAIL_*` environment variables with
/// local-use defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address to bind.
    pub listen_addr: String,
    /// Port to bind.
    pub listen_port: u16,
    /// Path of the `SQLite` database file.
    pub database_path: String,
    /// Path of the Google client-credentials JSON file.
    pub google_credentials_path: String,
}

impl Settings {
    /// Loads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable cannot be parsed into its field.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("listen_addr", "0.0.0.0")?
            .set_default("listen_port", 5000)?
            .set_default("database_path", "jobtrail.db")?
            .set_default("google_credentials_path", "credentials.json")?
            .add_source(Environment::with_prefix("JOBTRAIL"))
            .build()?
            .try_deserialize()
    }

    /// The `addr:port` string the listener binds.
    #[must_use]
    pub fn listen_on(&self) -> String {
        format!("{}:{}", self.listen_addr, self.listen_port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.listen_port, 5000);
        assert_eq!(settings.listen_on(), "0.0.0.0:5000");
        assert_eq!(settings.google_credentials_path, "credentials.json");
    }
}
