//! Per-client rate limiting middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::net::IpAddr;
use tower_governor::GovernorError;
use tower_governor::key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Rejects requests whose client has exhausted its quota with `429`.
///
/// # Key Extraction
///
/// - Default: the socket peer address (requires `ConnectInfo<SocketAddr>`)
/// - `behind_proxy`: `X-Forwarded-For`, `X-Real-IP` and `Forwarded` first,
///   then the peer address; enable only behind a trusted reverse proxy
///
/// Requests without an extractable key are let through.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/shorten", post(shorten_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match client_key(&request, state.behind_proxy) {
        Ok(ip) => {
            if !state.rate_limiter.check(&ip.to_string()).await {
                return Err(AppError::RateLimited);
            }
        }
        Err(e) => debug!(error = ?e, "No client key, skipping rate limit"),
    }

    Ok(next.run(request).await)
}

fn client_key(request: &Request, behind_proxy: bool) -> Result<IpAddr, GovernorError> {
    if behind_proxy {
        SmartIpKeyExtractor.extract(request)
    } else {
        PeerIpKeyExtractor.extract(request)
    }
}
