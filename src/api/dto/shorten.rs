//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::http_url;

/// Longest original URL accepted, in characters.
pub const MAX_URL_LENGTH: usize = 500;

/// Request to shorten a single URL.
///
/// `url` is optional at the decoding stage so that a missing or `null` value
/// is reported by validation (422) rather than by the decoder (400).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ShortenRequest {
    #[validate(required, custom(function = "http_url"), length(max = 500))]
    pub url: Option<String>,
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub alias: String,
    pub short_url: String,
}
