//! Mapping of core errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jobtrail_core::Error as CoreError;
use serde_json::json;
use tracing::error;

/// Result alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A core error on its way out as a JSON `{error}` response.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::JobNotFound(_) => StatusCode::NOT_FOUND,
            CoreError::NotAuthenticated | CoreError::AuthExpired => StatusCode::UNAUTHORIZED,
            CoreError::Gmail(_) | CoreError::OAuth(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!(status = status.as_u16(), "request failed: {}", self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError(CoreError::JobNotFound(7)).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unauthorized = ApiError(CoreError::NotAuthenticated).into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let expired = ApiError(CoreError::AuthExpired).into_response();
        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);

        let config = ApiError(CoreError::Config("missing credentials".into())).into_response();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
