//! Job record data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an application stands, as far as the classifier can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobStatus {
    /// No signal in the email yet.
    #[default]
    #[serde(rename = "Not Seen")]
    NotSeen,
    /// In flight: interview or screening activity detected.
    Applied,
    /// A rejection was detected.
    Rejected,
    /// An offer or progression was detected.
    Selected,
}

impl JobStatus {
    /// Parse from the stored string representation.
    ///
    /// Unknown values fall back to [`JobStatus::NotSeen`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "applied" => Self::Applied,
            "rejected" => Self::Rejected,
            "selected" => Self::Selected,
            _ => Self::NotSeen,
        }
    }

    /// Convert to the stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotSeen => "Not Seen",
            Self::Applied => "Applied",
            Self::Rejected => "Rejected",
            Self::Selected => "Selected",
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A tracked job application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Unique identifier; `None` until persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Guessed or user-entered job title.
    pub title: String,
    /// Guessed or user-entered company name.
    pub company: String,
    /// Application status.
    pub status: JobStatus,
    /// When the application happened; the email's internal date for synced
    /// records.
    pub date_applied: DateTime<Utc>,
    /// Subject of the source email. Doubles as the sync de-duplication key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    /// Snippet of the source email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_snippet: Option<String>,
    /// Decoded plain-text body of the source email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_content: Option<String>,
    /// `From` header of the source email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
}

impl JobRecord {
    /// Creates a record entered by hand (no source email), applied now.
    #[must_use]
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            company: company.into(),
            status: JobStatus::NotSeen,
            date_applied: Utc::now(),
            email_subject: None,
            email_snippet: None,
            email_content: None,
            sender_email: None,
        }
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the applied date.
    #[must_use]
    pub const fn with_date_applied(mut self, date: DateTime<Utc>) -> Self {
        self.date_applied = date;
        self
    }
}

/// Partial update of a job record; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    /// New title.
    pub title: Option<String>,
    /// New company.
    pub company: Option<String>,
    /// New status.
    pub status: Option<JobStatus>,
    /// New applied date.
    pub date_applied: Option<DateTime<Utc>>,
    /// New source subject.
    pub email_subject: Option<String>,
    /// New source snippet.
    pub email_snippet: Option<String>,
    /// New source body.
    pub email_content: Option<String>,
    /// New sender.
    pub sender_email: Option<String>,
}

impl JobPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
