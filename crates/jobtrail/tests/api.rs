//! Integration tests for the dashboard API, driven through the router
//! with in-memory state. No network or Gmail credentials involved; the
//! auth-dependent routes are exercised in their unconfigured shapes.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use jobtrail::server::router::build_routes;
use jobtrail::server::state::AppState;

/// Router over fresh in-memory stores and a credentials path that does
/// not exist.
async fn test_app() -> Router {
    let state = AppState::in_memory("/nonexistent/credentials.json")
        .await
        .unwrap();
    build_routes(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn probes_respond() {
    let app = test_app().await;

    let livez = app.clone().oneshot(get("/livez")).await.unwrap();
    assert_eq!(livez.status(), StatusCode::OK);

    let healthz = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(healthz.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_then_list_jobs() {
    let app = test_app().await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/jobs",
            Some(json!({
                "title": "Software Engineer",
                "company": "Acme Corp",
                "status": "Applied",
                "dateApplied": "2026-08-01T12:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert!(created["id"].is_i64());
    assert_eq!(created["title"], "Software Engineer");
    assert_eq!(created["status"], "Applied");

    app.clone()
        .oneshot(request(
            "POST",
            "/api/jobs",
            Some(json!({
                "title": "Data Analyst",
                "company": "Initech",
                "dateApplied": "2026-08-05T12:00:00Z"
            })),
        ))
        .await
        .unwrap();

    let listed = app.oneshot(get("/api/jobs")).await.unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = body_json(listed).await;
    let jobs = listed.as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    // Newest applied date first.
    assert_eq!(jobs[0]["title"], "Data Analyst");
    assert_eq!(jobs[1]["title"], "Software Engineer");
    // Status defaults when the request omits it.
    assert_eq!(jobs[0]["status"], "Not Seen");
}

#[tokio::test]
async fn update_merges_status_change() {
    let app = test_app().await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/jobs",
            Some(json!({"title": "Engineer", "company": "Acme"})),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let updated = app
        .oneshot(request(
            "PUT",
            &format!("/api/jobs/{id}"),
            Some(json!({"status": "Rejected"})),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["status"], "Rejected");
    assert_eq!(updated["title"], "Engineer");
}

#[tokio::test]
async fn update_missing_job_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(request(
            "PUT",
            "/api/jobs/9999",
            Some(json!({"status": "Applied"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn delete_job_then_delete_again() {
    let app = test_app().await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/jobs",
            Some(json!({"title": "Engineer", "company": "Acme"})),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let deleted = app
        .clone()
        .oneshot(request("DELETE", &format!("/api/jobs/{id}"), None))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await["message"], "Job deleted");

    let again = app
        .oneshot(request("DELETE", &format!("/api/jobs/{id}"), None))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn auth_status_reports_unauthenticated() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/auth/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["authenticated"], false);
    assert!(status.get("error").is_none());
}

#[tokio::test]
async fn revoke_without_credential_is_noop_success() {
    let app = test_app().await;

    let response = app
        .oneshot(request("POST", "/api/auth/revoke", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No active authentication");
}

#[tokio::test]
async fn auth_url_without_app_credentials_fails() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/auth/url")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn sync_without_app_credentials_fails() {
    let app = test_app().await;

    let response = app
        .oneshot(request("POST", "/api/sync", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn callback_without_code_is_bad_request() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/auth/callback")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("No authorization code received"));
}
