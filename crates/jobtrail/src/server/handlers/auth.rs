//! Gmail authentication handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::{Deserialize, Serialize};

use crate::server::error::ApiResult;
use crate::server::state::AppState;

/// Response of `GET /api/auth/status`.
#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    /// Whether a usable credential is stored.
    pub authenticated: bool,
    /// Failure detail when one isn't.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `GET /api/auth/url`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    /// Consent URL to open in a browser.
    pub auth_url: String,
}

/// Response of `POST /api/auth/revoke`.
#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    /// Whether a credential was revoked.
    pub success: bool,
    /// Human-readable outcome.
    pub message: &'static str,
}

/// Query parameters of the OAuth redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// Authorization code; absent when the user denied consent.
    pub code: Option<String>,
}

/// `GET /api/auth/status`.
pub async fn status(State(state): State<AppState>) -> Json<AuthStatusResponse> {
    let status = state.auth.status().await;
    Json(AuthStatusResponse {
        authenticated: status.authenticated,
        error: status.error,
    })
}

/// `GET /api/auth/url` - issue the consent URL.
pub async fn url(State(state): State<AppState>) -> ApiResult<Json<AuthUrlResponse>> {
    let url = state.auth.begin_authorization().await?;
    Ok(Json(AuthUrlResponse {
        auth_url: url.to_string(),
    }))
}

/// `GET /api/auth/callback` - the OAuth redirect target.
///
/// Responds with a small HTML page since the browser lands here directly.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> (StatusCode, Html<String>) {
    let Some(code) = params.code else {
        return (
            StatusCode::BAD_REQUEST,
            Html(error_page(
                "No authorization code received. Please try again.",
            )),
        );
    };

    match state.auth.complete_authorization(&code).await {
        Ok(()) => (StatusCode::OK, Html(success_page())),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(error_page(&e.to_string())),
        ),
    }
}

/// `POST /api/auth/revoke`.
///
/// Revoking with nothing stored succeeds with `success: false`.
pub async fn revoke(State(state): State<AppState>) -> ApiResult<Json<RevokeResponse>> {
    let revoked = state.auth.revoke().await?;
    Ok(Json(RevokeResponse {
        success: revoked,
        message: if revoked {
            "Authentication revoked"
        } else {
            "No active authentication"
        },
    }))
}

fn success_page() -> String {
    page(
        "Authentication Successful",
        "Your Gmail account has been connected. You can close this window and sync your job emails.",
    )
}

fn error_page(detail: &str) -> String {
    page("Authentication Failed", detail)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n\
         <body><h1>{title}</h1><p>{body}</p></body>\n</html>\n"
    )
}
