//! Request middleware: body validation and access logging

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::metrics::{self, Outcome};
use crate::state::GuardState;

/// Raw request body as received, available to handlers behind the guard
#[derive(Debug, Clone)]
pub struct RawBody(pub Bytes);

/// The decoded body that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedPayload(pub Arc<Value>);

/// Buffer the body, validate it and replay it to the next handler.
///
/// Empty bodies pass through untouched. Unparsable JSON is a 400, a body that
/// fails any field check is a 422 with a generic message; the individual
/// failures are logged under the response's correlation id.
pub async fn validate_request(
    State(guard): State<GuardState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, guard.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(
                limit = guard.max_body_bytes,
                error = %err,
                "Failed to buffer request body"
            );
            metrics::observe_validation(Outcome::TooLarge, 0);
            return ApiError::payload_too_large("request body too large").into_response();
        }
    };

    if bytes.iter().all(is_json_whitespace) {
        metrics::observe_validation(Outcome::Empty, 0);
        return next.run(Request::from_parts(parts, Body::from(bytes))).await;
    }

    let payload: Value = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(method = %parts.method, uri = %parts.uri, error = %err, "Malformed JSON body");
            metrics::observe_validation(Outcome::Malformed, 0);
            return ApiError::bad_request("malformed request body").into_response();
        }
    };

    let violations = guard.validator.violations(&payload);
    if !violations.is_empty() {
        let correlation_id = Uuid::new_v4().to_string();
        let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
        tracing::error!(
            %correlation_id,
            method = %parts.method,
            uri = %parts.uri,
            errors = ?details,
            "Validation error"
        );
        metrics::observe_validation(Outcome::Rejected, violations.len());
        return ApiError::unprocessable("invalid request")
            .with_correlation_id(correlation_id)
            .into_response();
    }

    metrics::observe_validation(Outcome::Accepted, 0);
    parts.extensions.insert(RawBody(bytes.clone()));
    parts.extensions.insert(ValidatedPayload(Arc::new(payload)));

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Whitespace as JSON defines it; form feed and other ASCII blanks are not
fn is_json_whitespace(byte: &u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    metrics::observe_http(method.as_str(), &path, status, elapsed.as_secs_f64());

    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());

    response
}
