//! Liveness and health probes.

use axum::extract::State;

use crate::server::error::ApiResult;
use crate::server::state::AppState;

/// `GET /livez` - process is up.
pub async fn livez() {
    tracing::debug!("service is live");
}

/// `GET /healthz` - process is up and the database answers.
pub async fn healthz(State(state): State<AppState>) -> ApiResult<()> {
    state.jobs.ping().await?;
    tracing::debug!("service is healthy");
    Ok(())
}
