//! HTTP middleware for request processing and protection.
//!
//! Provides request IDs, tracing, rate limiting, panic recovery and
//! response formatting middleware.

pub mod error_body;
pub mod pretty;
pub mod rate_limit;
pub mod recover;
pub mod request_id;
pub mod tracing;
