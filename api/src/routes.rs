use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers,
    middleware::{request_logger, validate_request},
    state::{AppState, GuardState},
};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(handlers::metrics_endpoint))
}

/// Routes whose bodies go through the validator before the handler runs
pub fn guarded_routes(guard: GuardState) -> Router<AppState> {
    Router::new()
        .route("/api/echo", post(handlers::echo))
        .route_layer(middleware::from_fn_with_state(guard, validate_request))
}

pub fn app(state: AppState, guard: GuardState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(observability_routes())
        .merge(guarded_routes(guard))
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
