//! Short link entity: one original URL and its alias.

use chrono::{DateTime, Utc};

/// A stored mapping between an original URL and its short alias.
///
/// Rows are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub alias: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: i64, original_url: String, alias: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original_url,
            alias,
            created_at,
        }
    }
}

/// Input data for creating a short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub alias: String,
}

impl NewShortLink {
    pub fn new(original_url: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            alias: alias.into(),
        }
    }
}
