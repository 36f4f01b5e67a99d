//! Per-client rate limiting.
//!
//! Provides a [`RateLimiter`] trait with two implementations:
//! - [`InMemoryRateLimiter`] - Keyed token buckets held in process memory
//! - [`NullRateLimiter`] - Admits everything; used when limiting is disabled

mod memory;
mod null;
mod service;

pub use memory::{InMemoryRateLimiter, spawn_janitor};
pub use null::NullRateLimiter;
pub use service::RateLimiter;

#[cfg(test)]
pub use service::MockRateLimiter;
