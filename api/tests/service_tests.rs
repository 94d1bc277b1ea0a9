// End-to-end checks against the full router.

use api::metrics;
use api::routes;
use api::state::{AppState, GuardState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use guard::PayloadValidator;
use prometheus::Registry;
use serde_json::Value;
use tower::ServiceExt;

fn test_app() -> Router {
    let registry = Registry::new_custom(Some("test".into()), None).unwrap();
    metrics::register_all(&registry).unwrap();
    let guard = GuardState::new(PayloadValidator::shared().unwrap(), 64 * 1024);
    routes::app(AppState::new(registry), guard)
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_echo_accepts_valid_payload() {
    let body = r#"{"customer":{"email":"asha@example.in","phone":"9876543210"},"pan":"ABCDE1234F","items":[{"sku_id":"X12"}]}"#;
    let (status, json) = post_json(test_app(), "/api/echo", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["payload"]["pan"], "ABCDE1234F");
    assert_eq!(json["bytes"], body.len());
    assert_eq!(json["replayed"], true);
}

#[tokio::test]
async fn test_echo_rejects_invalid_payload() {
    let (status, json) = post_json(test_app(), "/api/echo", r#"{"otp":"12345"}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "UnprocessableEntity");
    assert_eq!(json["message"], "invalid request");
    assert_eq!(json["code"], 422);
}

#[tokio::test]
async fn test_echo_without_body() {
    let (status, json) = post_json(test_app(), "/api/echo", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "request body is required");
}

#[tokio::test]
async fn test_malformed_json() {
    let (status, json) = post_json(test_app(), "/api/echo", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "malformed request body");
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, json) = post_json(test_app(), "/api/missing", r#"{"otp":"1"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NotFound");
}

#[tokio::test]
async fn test_health() {
    let (status, text) = get_text(test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_metrics_report_validation_outcomes() {
    let app = test_app();
    post_json(app.clone(), "/api/echo", r#"{"mobile":"1"}"#).await;

    let (status, text) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("test_payload_validations_total"));
    assert!(text.contains(r#"outcome="rejected""#));
    assert!(text.contains("test_payload_violations_total"));
}
