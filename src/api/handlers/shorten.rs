//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::{RequestId, StrictJson};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short alias for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "alias": "y8C_QJd_O7G",
///   "short_url": "http://localhost:8080/r/y8C_QJd_O7G"
/// }
/// ```
///
/// Submitting a URL that was shortened before returns its original alias.
///
/// # Errors
///
/// - 400 if the body is empty or not exactly one well-formed JSON object
/// - 422 if `url` is missing, not an HTTP(S) URL, or longer than 500 characters
/// - 413 if the body exceeds the size limit
pub async fn shorten_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    StrictJson(payload): StrictJson<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;
    let url = payload.url.unwrap_or_default();

    let link = state.link_service.shorten(&url, &request_id).await?;
    let short_url = state.link_service.short_url(&link.alias);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            alias: link.alias,
            short_url,
        }),
    ))
}
