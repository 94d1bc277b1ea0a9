use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::middleware::{RawBody, ValidatedPayload};
use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let body = metrics::gather_metrics(&state.registry);
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

/// Return the validated payload together with what the handler saw of the
/// replayed body stream.
pub async fn echo(
    payload: Option<Extension<ValidatedPayload>>,
    raw: Option<Extension<RawBody>>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let Some(Extension(ValidatedPayload(payload))) = payload else {
        return Err(ApiError::bad_request("request body is required"));
    };
    let replayed = raw.is_some_and(|Extension(RawBody(raw))| raw == body);

    Ok(Json(json!({
        "payload": *payload,
        "bytes": body.len(),
        "replayed": replayed,
    })))
}

pub async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "NotFound", "route not found")
}
