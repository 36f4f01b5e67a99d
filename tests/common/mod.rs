#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use shortlink::application::services::LinkService;
use shortlink::domain::entities::{NewShortLink, ShortLink};
use shortlink::domain::repositories::ShortLinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgShortLinkRepository;
use shortlink::routes::build_router;
use shortlink::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Repository keeping links in a map, with the same dedup and collision rules
/// as the PostgreSQL one.
pub struct InMemoryRepo {
    links: Mutex<HashMap<String, ShortLink>>,
    healthy: bool,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            healthy: true,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            healthy: false,
        }
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryRepo {
    async fn insert_or_get(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();

        if let Some(existing) = links.get(&new_link.original_url) {
            return Ok(existing.clone());
        }
        if links.values().any(|l| l.alias == new_link.alias) {
            return Err(AppError::AliasCollision {
                alias: new_link.alias,
            });
        }

        let link = ShortLink::new(
            links.len() as i64 + 1,
            new_link.original_url.clone(),
            new_link.alias,
            Utc::now(),
        );
        links.insert(new_link.original_url, link.clone());
        Ok(link)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.values().find(|l| l.alias == alias).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }
}

pub fn state_with_repo(repo: Arc<dyn ShortLinkRepository>) -> AppState {
    AppState::new(Arc::new(LinkService::new(repo, BASE_URL)))
}

/// Full router over an in-memory repository.
pub fn test_app() -> Router {
    build_router(state_with_repo(Arc::new(InMemoryRepo::new())), TEST_TIMEOUT)
}

pub fn test_server(app: Router) -> TestServer {
    TestServer::new(app).unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let repo = Arc::new(PgShortLinkRepository::new(Arc::new(pool)));
    state_with_repo(repo)
}

pub async fn create_test_link(pool: &PgPool, url: &str, alias: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO urls (original_url, alias) VALUES ($1, $2) RETURNING id")
        .bind(url)
        .bind(alias)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}
