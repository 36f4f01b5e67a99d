//! Rewrites bodiless error responses into the JSON error format.
//!
//! Layers such as the body limit and the request timeout answer with their
//! own plain-text or empty bodies. This middleware replaces those with the
//! `{"error": ...}` body of the matching [`AppError`]. Responses that are
//! already JSON pass through untouched.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub async fn layer(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    match AppError::from_status(status) {
        Some(err) => err.into_response(),
        None => response,
    }
}

pub(crate) fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}
