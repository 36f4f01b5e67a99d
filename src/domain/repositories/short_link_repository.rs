//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for URL to alias mappings.
///
/// Uniqueness of both the original URL and the alias is enforced by the
/// backing store, not by callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Stores `new_link` unless its original URL is already known.
    ///
    /// Runs as one atomic statement. When the URL already exists, no row is
    /// written and the stored link (with its original alias) is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasCollision`] if a different URL already owns
    /// the alias.
    ///
    /// Returns [`AppError::Database`] or [`AppError::QueryTimeout`] on
    /// storage failures.
    async fn insert_or_get(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its alias.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] or [`AppError::QueryTimeout`] on
    /// storage failures.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError>;

    /// Checks that the backing store answers queries.
    async fn ping(&self) -> Result<(), AppError>;
}
