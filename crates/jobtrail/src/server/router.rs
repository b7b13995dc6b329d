//! Route table for the dashboard API.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::state::AppState;

/// Builds the router over the given state.
///
/// CORS is wide open: the dashboard is served from its own origin.
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/status", get(handlers::auth::status))
        .route("/api/auth/url", get(handlers::auth::url))
        .route("/api/auth/callback", get(handlers::auth::callback))
        .route("/api/auth/revoke", post(handlers::auth::revoke))
        .route("/api/sync", post(handlers::sync::run))
        .route(
            "/api/jobs",
            get(handlers::jobs::list).post(handlers::jobs::create),
        )
        .route(
            "/api/jobs/{id}",
            put(handlers::jobs::update).delete(handlers::jobs::remove),
        )
        .route("/healthz", get(handlers::probes::healthz))
        .route("/livez", get(handlers::probes::livez))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
