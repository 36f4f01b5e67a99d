//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`rate_limit`] - Rate limiter abstraction and its in-memory backend

pub mod persistence;
pub mod rate_limit;
