//! Custom request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

use crate::api::middleware::request_id::REQUEST_ID_HEADER;
use crate::error::AppError;
use crate::utils::json::decode_strict;

/// JSON body extractor with strict decoding.
///
/// Unlike [`axum::Json`] it ignores `Content-Type`, rejects trailing values and
/// reports failures with the messages defined by [`crate::utils::json::DecodeError`].
/// An oversized body is reported as [`AppError::PayloadTooLarge`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson<T>(pub T);

impl<S, T> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::internal(format!("failed to read request body: {}", rejection.body_text()))
            }
        })?;

        Ok(Self(decode_strict(&bytes)?))
    }
}

/// Value of the `x-request-id` header, or an empty string when absent.
#[derive(Debug, Clone, Default)]
pub struct RequestId(pub String);

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(Self(id))
    }
}
