//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, news client and cache setup, worker spawning,
//! and Axum server lifecycle.

use crate::application::services::{AnalyticsService, NewsService, ShortenerService};
use crate::config::Config;
use crate::domain::access_worker::run_access_worker;
use crate::domain::repositories::ShortCodeStore;
use crate::infrastructure::cache::TtlCache;
use crate::infrastructure::news::NewsApiClient;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::clock::{Clock, SystemClock};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use chrono::Duration;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// How often expired cache entries and in-memory shortlinks are swept.
const CACHE_PURGE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

fn ttl(seconds: u64) -> Duration {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// Runs `purge` on a fixed interval for the life of the process.
fn spawn_purge<F>(what: &'static str, purge: F)
where
    F: Fn() -> usize + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CACHE_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = purge();
            if purged > 0 {
                tracing::debug!("Purged {} expired {}", purged, what);
            }
        }
    });
}

/// An in-memory store whose expired shortlinks are swept in the background.
fn memory_store() -> Arc<dyn ShortCodeStore> {
    let store = Arc::new(MemoryStore::new());
    let target = store.clone();
    spawn_purge("shortlink records", move || target.purge_expired());
    store
}

/// Connects the shortlink store, falling back to process memory when Redis is
/// not configured or unreachable.
async fn connect_store(config: &Config) -> Arc<dyn ShortCodeStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Shortlink store: in-memory");
        return memory_store();
    };

    match RedisStore::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Shortlink store: Redis");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to connect to Redis: {}. Shortlinks will not survive a restart.",
                e
            );
            memory_store()
        }
    }
}

/// Builds the application state and spawns its background workers.
///
/// # Errors
///
/// Returns an error if `BASE_URL` has no host or the news client cannot be
/// built.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = connect_store(config).await;

    let shortener = Arc::new(
        ShortenerService::new(store.clone(), config.base_url.clone())
            .with_prefix(config.shortlink_prefix.clone())
            .with_code_length(config.short_code_length)
            .with_ttl_seconds(config.shortlink_ttl_seconds),
    );

    let news_client = NewsApiClient::new(&config.news_api_url, config.news_api_key.clone())
        .context("Failed to build News API client")?;
    let news_service = Arc::new(NewsService::new(
        Arc::new(news_client),
        shortener.clone(),
        TtlCache::new(ttl(config.news_cache_ttl_seconds), clock.clone()),
    ));

    let analytics_service = Arc::new(AnalyticsService::new(
        config.analytics_file.clone(),
        TtlCache::new(ttl(config.analytics_cache_ttl_seconds), clock),
    ));

    let (access_tx, access_rx) = mpsc::channel(config.access_queue_capacity);
    tokio::spawn(run_access_worker(access_rx, config.analytics_file.clone()));
    tracing::info!("Access worker started");

    let purge_target = news_service.clone();
    spawn_purge("news cache entries", move || purge_target.purge_cache());

    Ok(AppState::new(
        shortener,
        news_service,
        analytics_service,
        store,
        access_tx,
        config.base_domain()?,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Shortlink store (Redis, or in-memory fallback)
/// - News API client and headline cache
/// - Background access worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The application state cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    // Response bodies decide on color per request, never from our own tty.
    colored::control::set_override(true);

    let state = build_state(&config).await?;
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
