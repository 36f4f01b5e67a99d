//! Shared state injected into every handler and middleware.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::rate_limit::{NullRateLimiter, RateLimiter};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// When true, the rate limiter keys on `X-Forwarded-For` / `X-Real-IP`
    /// instead of the socket peer address.
    pub behind_proxy: bool,
}

impl AppState {
    /// State with rate limiting disabled.
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self {
            link_service,
            rate_limiter: Arc::new(NullRateLimiter::new()),
            behind_proxy: false,
        }
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiter>, behind_proxy: bool) -> Self {
        self.rate_limiter = rate_limiter;
        self.behind_proxy = behind_proxy;
        self
    }
}
