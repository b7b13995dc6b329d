//! HTTP server: router, state and handlers for the dashboard API.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use tracing::info;

use crate::config::Settings;
use router::build_routes;
use state::AppState;

/// Binds the listener and serves the API until interrupted.
///
/// # Errors
///
/// Returns an error if state construction or the listener fails.
pub async fn listen(settings: Settings) -> anyhow::Result<()> {
    let state = AppState::new(&settings).await?;
    let listener = tokio::net::TcpListener::bind(settings.listen_on()).await?;
    info!("Listening at {}", settings.listen_on());

    tokio::select! {
        r = axum::serve(listener, build_routes(state)) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r);
        },
        _ = tokio::signal::ctrl_c() => {
            info!("received ctrl+c interrupt, closing server");
        }
    }
    Ok(())
}
