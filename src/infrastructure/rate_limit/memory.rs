//! In-memory keyed token bucket limiter backed by `governor`.

use async_trait::async_trait;
use governor::{DefaultKeyedRateLimiter, Quota};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::service::RateLimiter;

/// Token bucket per key, refilled at `per_second` with room for `burst`.
///
/// Buckets live in a concurrent map. Idle buckets are removed by
/// [`RateLimiter::evict_idle`], which [`spawn_janitor`] calls periodically.
pub struct InMemoryRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl InMemoryRateLimiter {
    pub fn new(per_second: NonZeroU32, burst: NonZeroU32) -> Self {
        let quota = Quota::per_second(per_second).allow_burst(burst);
        Self {
            limiter: governor::RateLimiter::keyed(quota),
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> bool {
        self.limiter.check_key(&key.to_owned()).is_ok()
    }

    fn evict_idle(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

/// Spawns a task that evicts idle keys every `every`.
///
/// Keys idle for longer than it takes their bucket to refill are dropped, so
/// with `every` set to the configured expiry the map holds only clients seen
/// within roughly that window.
pub fn spawn_janitor(limiter: Arc<dyn RateLimiter>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let before = limiter.tracked_keys();
            limiter.evict_idle();
            debug!(
                before,
                after = limiter.tracked_keys(),
                "Evicted idle rate limit keys"
            );
        }
    })
}
