//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with `sqlx::query_as` and mapped through
//! `sqlx::FromRow`, so the crate builds without a live database.

pub mod pg_short_link_repository;

pub use pg_short_link_repository::{DEFAULT_QUERY_TIMEOUT, PgShortLinkRepository};
