//! CRUD handlers for job records.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use jobtrail_core::{Error as CoreError, JobPatch, JobRecord, JobStatus};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

/// Body of `POST /api/jobs`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    /// Job title.
    pub title: String,
    /// Company name.
    pub company: String,
    /// Status; defaults to `Not Seen`.
    #[serde(default)]
    pub status: JobStatus,
    /// Applied date; defaults to now.
    pub date_applied: Option<DateTime<Utc>>,
    /// Source email subject.
    pub email_subject: Option<String>,
    /// Source email snippet.
    pub email_snippet: Option<String>,
    /// Source email body.
    pub email_content: Option<String>,
    /// Source email sender.
    pub sender_email: Option<String>,
}

/// `POST /api/jobs` - create a record by hand.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<JobRecord>)> {
    let mut record = JobRecord::new(input.title, input.company).with_status(input.status);
    if let Some(date) = input.date_applied {
        record = record.with_date_applied(date);
    }
    record.email_subject = input.email_subject;
    record.email_snippet = input.email_snippet;
    record.email_content = input.email_content;
    record.sender_email = input.sender_email;

    let saved = state.jobs.insert(record).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `GET /api/jobs` - all records, newest applied first.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<JobRecord>>> {
    Ok(Json(state.jobs.list().await?))
}

/// `PUT /api/jobs/{id}` - partial update (e.g. a status change).
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<JobPatch>,
) -> ApiResult<Json<JobRecord>> {
    state
        .jobs
        .update(id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError(CoreError::JobNotFound(id)))
}

/// `DELETE /api/jobs/{id}`.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    if state.jobs.delete(id).await? {
        Ok(Json(json!({ "message": "Job deleted" })))
    } else {
        Err(ApiError(CoreError::JobNotFound(id)))
    }
}
