//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`             - Landing page with the shorten form
//! - `GET  /health`       - Health check (database ping)
//! - `GET  /r/{alias}`    - Short link redirect
//! - `POST /api/shorten`  - Create a short alias
//!
//! # Middleware (outermost first)
//!
//! - **Request ID** - Assigns `x-request-id` and echoes it on the response
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - Panics become `500 internal server error`
//! - **Pretty printing** - `?pretty` indents JSON responses
//! - **Error bodies** - Layer-generated 4xx/5xx get the JSON error format
//! - **Timeout** - Per-request deadline, answered with `408`
//! - **Body limit** - Requests over [`BODY_LIMIT`] get `413`
//! - **Rate limiting** - Per-IP token bucket, `429` when exhausted
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    health_handler, method_not_allowed_handler, not_found_handler, redirect_handler,
};
use crate::api::middleware::{error_body, pretty, rate_limit, recover, request_id, tracing as trace};
use crate::state::AppState;
use crate::web;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use std::time::Duration;
use tower::Layer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Maximum accepted request body size (1 MiB).
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Builds the router with all routes and middleware, without path normalization.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .route("/r/{alias}", get(redirect_handler))
        .nest("/api", api::routes::routes())
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(error_body::layer))
        .layer(middleware::from_fn(pretty::layer))
        .layer(recover::layer())
        .layer(request_id::propagate_layer())
        .layer(trace::layer())
        .layer(request_id::set_layer())
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/health/` and `/health`
/// reach the same handler.
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, request_timeout))
}
