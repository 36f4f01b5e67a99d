//! Rate limiter capability trait.

use async_trait::async_trait;

/// Per-key admission control.
///
/// Implementations must be safe to share across request tasks. The trait is
/// async so a networked store can stand in for the in-process one.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::InMemoryRateLimiter`] - Token buckets in process memory
/// - [`crate::infrastructure::rate_limit::NullRateLimiter`] - Admits everything
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Consumes one unit for `key`. Returns `false` if the request must be rejected.
    async fn check(&self, key: &str) -> bool;

    /// Drops state for keys that have been idle long enough to be indistinguishable
    /// from fresh ones.
    fn evict_idle(&self) {}

    /// Number of keys currently tracked.
    fn tracked_keys(&self) -> usize {
        0
    }
}
