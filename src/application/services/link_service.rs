//! Short link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::alias::generate_alias;

/// Path prefix under which aliases are served.
pub const REDIRECT_PREFIX: &str = "/r/";

/// Service for creating and resolving short links.
///
/// Deduplication is left entirely to the repository's atomic insert-or-get;
/// this service never checks for an existing row first.
pub struct LinkService {
    repository: Arc<dyn ShortLinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service. A trailing `/` on `base_url` is ignored.
    pub fn new(repository: Arc<dyn ShortLinkRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_url,
        }
    }

    /// Shortens an already validated URL.
    ///
    /// The candidate alias is derived from the URL and `request_id`. If the URL
    /// was shortened before, the stored alias is returned instead of the
    /// candidate.
    ///
    /// # Errors
    ///
    /// Propagates repository errors unchanged.
    pub async fn shorten(&self, url: &str, request_id: &str) -> Result<ShortLink, AppError> {
        let alias = generate_alias(url, request_id);
        let link = self
            .repository
            .insert_or_get(NewShortLink::new(url, alias.as_str()))
            .await?;

        if link.alias != alias {
            tracing::debug!(url, alias = %link.alias, "URL already shortened, reusing alias");
        }

        Ok(link)
    }

    /// Resolves an alias to its stored link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this alias.
    pub async fn resolve(&self, alias: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_alias(alias)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Builds the public short URL for an alias.
    pub fn short_url(&self, alias: &str) -> String {
        format!("{}{}{}", self.base_url, REDIRECT_PREFIX, alias)
    }

    /// Returns `Ok(())` if the repository is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
