//! Credential repository: one row, replaced atomically.
//!
//! The tracker serves a single user, so the table holds at most one
//! credential. Saving is a single `INSERT OR REPLACE` statement; there is
//! no read-modify-write window for a concurrent refresh to tear.

use chrono::{DateTime, Utc};
use jobtrail_oauth::Credential;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::Result;

/// Repository for the stored Gmail credential.
pub struct CredentialRepository {
    pool: SqlitePool,
}

impl CredentialRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation
    /// fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation
    /// fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS credential (
                id INTEGER PRIMARY KEY CHECK (id = 0),
                access_token TEXT NOT NULL,
                refresh_token TEXT,
                expires_at TEXT,
                scope TEXT,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store the credential, replacing any previous one in one statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn save(&self, credential: &Credential) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO credential (id, access_token, refresh_token, expires_at, scope)
            VALUES (0, ?, ?, ?, ?)
            ",
        )
        .bind(&credential.access_token)
        .bind(&credential.refresh_token)
        .bind(credential.expires_at)
        .bind(&credential.scope)
        .execute(&self.pool)
        .await?;

        debug!("stored credential");
        Ok(())
    }

    /// Load the stored credential, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load(&self) -> Result<Option<Credential>> {
        let row = sqlx::query(
            "SELECT access_token, refresh_token, expires_at, scope FROM credential WHERE id = 0",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Credential {
            access_token: r.get("access_token"),
            refresh_token: r.get("refresh_token"),
            expires_at: r.get::<Option<DateTime<Utc>>, _>("expires_at"),
            scope: r.get("scope"),
        }))
    }

    /// Delete the stored credential. A no-op when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self) -> Result<()> {
        sqlx::query("DELETE FROM credential WHERE id = 0")
            .execute(&self.pool)
            .await?;

        debug!("deleted credential");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn credential(token: &str) -> Credential {
        Credential {
            access_token: token.to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            scope: None,
        }
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let repo = CredentialRepository::in_memory().await.unwrap();

        repo.save(&credential("ya29.first")).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();

        assert_eq!(loaded.access_token, "ya29.first");
        assert_eq!(loaded.refresh_token.as_deref(), Some("1//refresh"));
        assert!(loaded.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_save_replaces_previous() {
        let repo = CredentialRepository::in_memory().await.unwrap();

        repo.save(&credential("ya29.first")).await.unwrap();
        repo.save(&credential("ya29.second")).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "ya29.second");
    }

    #[tokio::test]
    async fn test_load_when_empty() {
        let repo = CredentialRepository::in_memory().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_noop_when_empty() {
        let repo = CredentialRepository::in_memory().await.unwrap();
        repo.delete().await.unwrap();

        repo.save(&credential("ya29.first")).await.unwrap();
        repo.delete().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }
}
