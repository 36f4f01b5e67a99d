//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, rate limiter setup and the Axum
//! server lifecycle including graceful shutdown.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::persistence::PgShortLinkRepository;
use crate::infrastructure::rate_limit::{
    InMemoryRateLimiter, NullRateLimiter, RateLimiter, spawn_janitor,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Rate limiter (in-memory or disabled) and its eviction task
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - A migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply database migrations")?;
    tracing::info!("Migrations applied");

    let repository = Arc::new(PgShortLinkRepository::with_query_timeout(
        Arc::new(pool.clone()),
        config.query_timeout(),
    ));
    let link_service = Arc::new(LinkService::new(repository, config.base_url.clone()));

    let rate_limiter = build_rate_limiter(&config);
    let state = AppState::new(link_service).with_rate_limiter(rate_limiter, config.behind_proxy);

    let app = app_router(state, config.request_timeout());

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

fn build_rate_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    match config.rate_limits() {
        Some((per_second, burst)) => {
            let limiter: Arc<dyn RateLimiter> =
                Arc::new(InMemoryRateLimiter::new(per_second, burst));
            spawn_janitor(
                limiter.clone(),
                Duration::from_secs(config.rate_limit_expiry_seconds),
            );
            tracing::info!("Rate limiting enabled ({per_second}/s, burst {burst})");
            limiter
        }
        None => {
            tracing::info!("Rate limiting disabled");
            Arc::new(NullRateLimiter::new())
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    tracing::info!("Shutdown signal received, draining connections");
}
