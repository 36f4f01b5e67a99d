//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::db_error::{ALIAS_CONSTRAINT, is_unique_violation_on};

/// Deadline applied to every query unless overridden.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// PostgreSQL repository for the `urls` table.
///
/// Every query runs under a deadline; an elapsed deadline drops the query
/// future and surfaces as [`AppError::QueryTimeout`].
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgShortLinkRepository {
    /// Creates a new repository with the default query deadline.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_query_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_query_timeout(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn find_by_original_url(&self, url: &str) -> Result<Option<ShortLink>, AppError> {
        let query = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, original_url, alias, created_at
            FROM urls
            WHERE original_url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref());

        Ok(self.bounded(query).await??)
    }

    async fn bounded<T, F>(&self, query: F) -> Result<Result<T, sqlx::Error>, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| AppError::QueryTimeout(self.query_timeout))
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn insert_or_get(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        // DO NOTHING leaves an existing row untouched; the second arm returns it.
        let query = sqlx::query_as::<_, ShortLink>(
            r#"
            WITH inserted AS (
                INSERT INTO urls (original_url, alias)
                VALUES ($1, $2)
                ON CONFLICT (original_url) DO NOTHING
                RETURNING id, original_url, alias, created_at
            )
            SELECT id, original_url, alias, created_at FROM inserted
            UNION ALL
            SELECT id, original_url, alias, created_at FROM urls WHERE original_url = $1
            LIMIT 1
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.alias)
        .fetch_optional(self.pool.as_ref());

        let inserted = self.bounded(query).await?.map_err(|e| {
            if is_unique_violation_on(&e, ALIAS_CONSTRAINT) {
                tracing::error!(
                    alias = %new_link.alias,
                    url = %new_link.original_url,
                    "Alias collision between different URLs"
                );
                AppError::AliasCollision {
                    alias: new_link.alias.clone(),
                }
            } else {
                AppError::Database(e)
            }
        })?;

        if let Some(link) = inserted {
            return Ok(link);
        }

        // The conflicting row was committed after the statement's snapshot.
        tracing::debug!(url = %new_link.original_url, "Concurrent insert, re-reading row");
        self.find_by_original_url(&new_link.original_url)
            .await?
            .ok_or_else(|| AppError::internal("conflicting row vanished after insert"))
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError> {
        let query = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, original_url, alias, created_at
            FROM urls
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref());

        Ok(self.bounded(query).await??)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let query = sqlx::query("SELECT 1").execute(self.pool.as_ref());

        self.bounded(query).await??;
        Ok(())
    }
}
