//! Indents JSON responses when the request carries a `pretty` query parameter.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error_body::is_json;
use crate::error::AppError;
use crate::utils::json::encode;

/// Re-encodes JSON response bodies with two-space indentation for requests
/// like `/api/shorten?pretty`. Other responses are returned unchanged.
pub async fn layer(request: Request, next: Next) -> Response {
    let wants_pretty = request.uri().query().is_some_and(has_pretty_param);
    let response = next.run(request).await;

    if !wants_pretty || !is_json(&response) {
        return response;
    }

    match reindent(response).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

fn has_pretty_param(query: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "pretty")
}

async fn reindent(response: Response) -> Result<Response, AppError> {
    let (mut parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::internal(format!("failed to buffer response body: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::internal(format!("response body is not valid JSON: {e}")))?;
    let pretty = encode(&value, true)
        .map_err(|e| AppError::internal(format!("failed to encode response body: {e}")))?;

    parts.headers.remove(header::CONTENT_LENGTH);
    Ok(Response::from_parts(parts, Body::from(pretty)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_pretty_param() {
        assert!(has_pretty_param("pretty"));
        assert!(has_pretty_param("pretty=1"));
        assert!(has_pretty_param("a=b&pretty"));
        assert!(!has_pretty_param("prettyish=1"));
        assert!(!has_pretty_param(""));
    }
}
