//! Job repository for persistent storage of job records.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};

use super::model::{JobPatch, JobRecord, JobStatus};
use crate::Result;

/// Repository for job records.
pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
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
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Not Seen',
                date_applied TEXT NOT NULL,
                email_subject TEXT,
                email_snippet TEXT,
                email_content TEXT,
                sender_email TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Index for the sync engine's subject de-duplication probe
        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_jobs_email_subject
            ON jobs(email_subject)
            ",
        )
        .execute(&self.pool)
        .await?;

        // Index for newest-first listing
        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_jobs_date_applied
            ON jobs(date_applied DESC)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new record, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: JobRecord) -> Result<JobRecord> {
        let result = sqlx::query(
            r"
            INSERT INTO jobs (title, company, status, date_applied,
                              email_subject, email_snippet, email_content, sender_email)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&record.title)
        .bind(&record.company)
        .bind(record.status.as_str())
        .bind(record.date_applied)
        .bind(&record.email_subject)
        .bind(&record.email_snippet)
        .bind(&record.email_content)
        .bind(&record.sender_email)
        .execute(&self.pool)
        .await?;

        Ok(JobRecord {
            id: Some(result.last_insert_rowid()),
            ..record
        })
    }

    /// List all records, newest applied date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<JobRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, company, status, date_applied,
                   email_subject, email_snippet, email_content, sender_email
            FROM jobs
            ORDER BY date_applied DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: i64) -> Result<Option<JobRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, title, company, status, date_applied,
                   email_subject, email_snippet, email_content, sender_email
            FROM jobs
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_record))
    }

    /// Apply a partial update, returning the updated record.
    ///
    /// Returns `None` (not an error) when no record has the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update(&self, id: i64, patch: &JobPatch) -> Result<Option<JobRecord>> {
        let updated = sqlx::query(
            r"
            UPDATE jobs
            SET title = COALESCE(?, title),
                company = COALESCE(?, company),
                status = COALESCE(?, status),
                date_applied = COALESCE(?, date_applied),
                email_subject = COALESCE(?, email_subject),
                email_snippet = COALESCE(?, email_snippet),
                email_content = COALESCE(?, email_content),
                sender_email = COALESCE(?, sender_email),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            ",
        )
        .bind(&patch.title)
        .bind(&patch.company)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.date_applied)
        .bind(&patch.email_subject)
        .bind(&patch.email_snippet)
        .bind(&patch.email_content)
        .bind(&patch.sender_email)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Delete a record by id.
    ///
    /// Returns whether a record was actually deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Verifies the database answers queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Whether a record with this exact email subject already exists.
    ///
    /// This is the sync engine's de-duplication probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists_by_subject(&self, subject: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM jobs WHERE email_subject = ? LIMIT 1")
            .bind(subject)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Find the first record with this exact email subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_subject(&self, subject: &str) -> Result<Option<JobRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, title, company, status, date_applied,
                   email_subject, email_snippet, email_content, sender_email
            FROM jobs
            WHERE email_subject = ?
            LIMIT 1
            ",
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_record))
    }
}

/// Convert a database row to a `JobRecord`.
fn row_to_record(row: &SqliteRow) -> JobRecord {
    JobRecord {
        id: Some(row.get("id")),
        title: row.get("title"),
        company: row.get("company"),
        status: JobStatus::parse(row.get("status")),
        date_applied: row.get::<DateTime<Utc>, _>("date_applied"),
        email_subject: row.get("email_subject"),
        email_snippet: row.get("email_snippet"),
        email_content: row.get("email_content"),
        sender_email: row.get("sender_email"),
    }
}
