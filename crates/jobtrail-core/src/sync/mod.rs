//! Sync engine: pull job-related messages from Gmail and persist the ones
//! we haven't seen.
//!
//! The run is deliberately simple — one sequential pass over at most
//! [`PAGE_SIZE`] messages, with a subject-equality probe as the duplicate
//! check. A failure on any message aborts the rest of the batch.

use std::sync::Arc;

use chrono::Utc;
use jobtrail_gmail::{GmailClient, Message};
use tracing::{debug, info};

use crate::auth::AuthSession;
use crate::classify::classify;
use crate::error::{Error, Result};
use crate::job::{JobRecord, JobRepository};

/// Gmail search query for job-related mail within the recency window.
pub const JOB_QUERY: &str = "subject:(job OR application OR interview OR career OR position OR hiring OR recruiter OR opportunity) newer_than:30d";

/// Maximum messages fetched per sync run.
pub const PAGE_SIZE: u32 = 20;

/// Subject recorded when a message has no Subject header.
const NO_SUBJECT: &str = "No Subject";

/// Result of one sync run.
#[derive(Debug, Clone, Copy)]
pub struct SyncOutcome {
    /// Number of newly created job records.
    pub count: u32,
}

/// Pulls candidate messages, classifies them and persists new records.
pub struct SyncEngine {
    auth: Arc<AuthSession>,
    jobs: Arc<JobRepository>,
}

impl SyncEngine {
    /// Creates a sync engine over the given auth session and job store.
    #[must_use]
    pub const fn new(auth: Arc<AuthSession>, jobs: Arc<JobRepository>) -> Self {
        Self { auth, jobs }
    }

    /// Runs one sync pass.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::Config`] when application credentials are
    /// missing and [`Error::NotAuthenticated`] when no credential is
    /// stored — both before any provider call. A provider authorization
    /// failure deletes the stored credential and surfaces
    /// [`Error::AuthExpired`]; any other provider or database error aborts
    /// the remaining batch.
    pub async fn run(&self) -> Result<SyncOutcome> {
        self.auth.ensure_configured()?;
        let access_token = self.auth.access_token().await?;
        let client = GmailClient::new(access_token);

        let refs = self
            .guard(client.list_messages(JOB_QUERY, PAGE_SIZE).await)
            .await?;
        debug!(candidates = refs.len(), "sync started");

        let mut count = 0;
        for msg_ref in refs {
            let message = self.guard(client.get_message(&msg_ref.id).await).await?;
            if self.ingest(&message).await? {
                count += 1;
            }
        }

        info!(count, "sync complete");
        Ok(SyncOutcome { count })
    }

    /// Ingests one fetched message; returns whether a record was created.
    ///
    /// Skips the message when a record with the same subject exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the job store fails.
    pub async fn ingest(&self, message: &Message) -> Result<bool> {
        let subject = message.subject().unwrap_or(NO_SUBJECT);

        if self.jobs.exists_by_subject(subject).await? {
            debug!(subject, "skipping already-synced message");
            return Ok(false);
        }

        let record = build_record(message);
        info!(
            title = %record.title,
            company = %record.company,
            status = record.status.as_str(),
            "synced job record"
        );
        self.jobs.insert(record).await?;
        Ok(true)
    }

    /// Converts a provider authorization failure into credential
    /// invalidation plus [`Error::AuthExpired`].
    async fn guard<T>(&self, result: jobtrail_gmail::Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_unauthorized() => {
                self.auth.invalidate().await?;
                Err(Error::AuthExpired)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Builds a job record from a fetched message via the classifier.
fn build_record(message: &Message) -> JobRecord {
    let subject = message.subject().unwrap_or(NO_SUBJECT);
    let sender = message.from().unwrap_or_default();
    let classification = classify(subject, &message.snippet, sender);

    JobRecord {
        id: None,
        title: classification.title,
        company: classification.company,
        status: classification.status,
        date_applied: message.internal_date_utc().unwrap_or_else(Utc::now),
        email_subject: Some(subject.to_string()),
        email_snippet: Some(message.snippet.clone()),
        email_content: message.plain_text_body(),
        sender_email: if sender.is_empty() {
            None
        } else {
            Some(sender.to_string())
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credential::CredentialRepository;
    use crate::job::JobStatus;

    fn spec_example_message() -> Message {
        serde_json::from_value(serde_json::json!({
            "id": "m1",
            "snippet": "Thank you for applying",
            "internalDate": "1722950400000",
            "payload": {
                "mimeType": "text/plain",
                "headers": [
                    {"name": "Subject", "value": "Application for Software Engineer - Acme Corp"},
                    {"name": "From", "value": "Acme Recruiting <recruiting@acme.com>"}
                ],
                "body": {"size": 22, "data": "VGhhbmsgeW91IGZvciBhcHBseWluZw=="}
            }
        }))
        .unwrap()
    }

    async fn engine() -> SyncEngine {
        let auth = AuthSession::new(
            "/nonexistent/credentials.json",
            CredentialRepository::in_memory().await.unwrap(),
        );
        SyncEngine::new(
            Arc::new(auth),
            Arc::new(JobRepository::in_memory().await.unwrap()),
        )
    }

    #[tokio::test]
    async fn test_ingest_creates_classified_record() {
        let engine = engine().await;

        assert!(engine.ingest(&spec_example_message()).await.unwrap());

        let jobs = engine.jobs.list().await.unwrap();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Software Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.status, JobStatus::NotSeen);
        assert_eq!(
            job.email_subject.as_deref(),
            Some("Application for Software Engineer - Acme Corp")
        );
        assert_eq!(
            job.email_content.as_deref(),
            Some("Thank you for applying")
        );
        assert_eq!(job.date_applied.timestamp_millis(), 1_722_950_400_000);
    }

    #[tokio::test]
    async fn test_ingest_deduplicates_by_subject() {
        let engine = engine().await;

        assert!(engine.ingest(&spec_example_message()).await.unwrap());
        // Second pass over an unchanged mailbox syncs nothing.
        assert!(!engine.ingest(&spec_example_message()).await.unwrap());
        assert_eq!(engine.jobs.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_handles_missing_headers() {
        let engine = engine().await;
        let bare: Message = serde_json::from_value(serde_json::json!({
            "id": "m2",
            "snippet": "We regret to inform you",
            "payload": {"mimeType": "text/plain"}
        }))
        .unwrap();

        assert!(engine.ingest(&bare).await.unwrap());

        let job = &engine.jobs.list().await.unwrap()[0];
        assert_eq!(job.email_subject.as_deref(), Some("No Subject"));
        assert_eq!(job.status, JobStatus::Rejected);
        assert!(job.sender_email.is_none());
    }

    #[tokio::test]
    async fn test_run_fails_fast_without_app_credentials() {
        let engine = engine().await;

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
