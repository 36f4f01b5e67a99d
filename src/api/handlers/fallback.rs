//! Handlers for requests that match no route.

use crate::error::AppError;

/// Unknown path.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

/// Known path, unsupported method.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
