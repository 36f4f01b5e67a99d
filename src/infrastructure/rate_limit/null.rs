//! No-op rate limiter used when rate limiting is disabled.

use async_trait::async_trait;
use tracing::debug;

use super::service::RateLimiter;

/// Admits every request.
pub struct NullRateLimiter;

impl NullRateLimiter {
    /// Creates a new NullRateLimiter instance.
    pub fn new() -> Self {
        debug!("Using NullRateLimiter (rate limiting disabled)");
        Self
    }
}

impl Default for NullRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiter for NullRateLimiter {
    async fn check(&self, _key: &str) -> bool {
        true
    }
}
