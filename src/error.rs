//! Application error type and its HTTP representation.
//!
//! Every failure that reaches a client goes through [`AppError`]'s
//! [`IntoResponse`] impl, which picks the status code, logs the full error
//! and sends `{"error": "<message>"}`. Server-side failures are reported to the
//! client only as `internal server error`.

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::utils::json::DecodeError;
use crate::utils::validation::FieldError;

/// Client-facing message for all 5xx responses.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error("requested resource could not be found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request timed out")]
    RequestTimeout,

    #[error("request entity too large")]
    PayloadTooLarge,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database query exceeded {0:?}")]
    QueryTimeout(Duration),

    #[error("alias {alias:?} is already taken by another URL")]
    AliasCollision { alias: String },

    #[error("{0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.into())
    }
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_)
            | Self::QueryTimeout(_)
            | Self::AliasCollision { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Never exposes server-side detail.
    pub fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Maps a status produced outside the handlers (layers, the router) to the
    /// matching error, if it is one this service reports itself.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::NOT_FOUND => Some(Self::NotFound),
            StatusCode::METHOD_NOT_ALLOWED => Some(Self::MethodNotAllowed),
            StatusCode::REQUEST_TIMEOUT => Some(Self::RequestTimeout),
            StatusCode::PAYLOAD_TOO_LARGE => Some(Self::PayloadTooLarge),
            StatusCode::TOO_MANY_REQUESTS => Some(Self::RateLimited),
            s if s.is_server_error() => Some(Self::internal(format!("upstream status {s}"))),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(ErrorBody::new(self.client_message()))).into_response()
    }
}
