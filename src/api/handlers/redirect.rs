//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::alias::is_well_formed;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /r/{alias}`
///
/// # Response
///
/// `303 See Other` with `Location` set to the original URL.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist. Paths that cannot be a
/// generated alias are rejected without a database lookup.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_well_formed(&alias) {
        return Err(AppError::NotFound);
    }

    let link = state.link_service.resolve(&alias).await?;

    let location = HeaderValue::from_str(&link.original_url).map_err(|e| {
        AppError::internal(format!(
            "stored URL for alias {alias} is not a valid header value: {e}"
        ))
    })?;

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]))
}
