//! Mailbox sync handler.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::server::error::ApiResult;
use crate::server::state::AppState;

/// Response of `POST /api/sync`.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// Human-readable outcome.
    pub message: &'static str,
    /// Number of newly created records.
    pub count: u32,
}

/// `POST /api/sync` - run one sync pass over the mailbox.
pub async fn run(State(state): State<AppState>) -> ApiResult<Json<SyncResponse>> {
    let outcome = state.sync.run().await?;
    Ok(Json(SyncResponse {
        message: "Sync complete",
        count: outcome.count,
    }))
}
