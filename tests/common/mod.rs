#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tower::Layer;

use getnews::application::services::{AnalyticsService, NewsService, ShortenerService};
use getnews::domain::access_event::AccessEvent;
use getnews::domain::entities::{Article, HeadlinesRequest};
use getnews::domain::repositories::{NewsSource, ShortCodeStore};
use getnews::error::AppError;
use getnews::infrastructure::cache::TtlCache;
use getnews::infrastructure::store::MemoryStore;
use getnews::state::AppState;
use getnews::utils::clock::SystemClock;

pub const BASE_URL: &str = "https://getnews.tech";
pub const BASE_DOMAIN: &str = "getnews.tech";

pub fn article(title: &str, url: &str) -> Article {
    Article::new(
        "Reuters".to_string(),
        title.to_string(),
        Some(format!("About {}", title)),
        url.to_string(),
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
    )
}

pub fn default_articles() -> Vec<Article> {
    vec![
        article("First story", "https://example.com/first"),
        article("Second story", "https://example.com/second"),
    ]
}

/// News source that returns a fixed list and records what it was asked.
pub struct StubNewsSource {
    articles: Vec<Article>,
    calls: AtomicUsize,
    last_request: std::sync::Mutex<Option<HeadlinesRequest>>,
}

impl StubNewsSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            calls: AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<HeadlinesRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for StubNewsSource {
    async fn top_headlines(&self, request: &HeadlinesRequest) -> Result<Vec<Article>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(self.articles.clone())
    }
}

/// News source that always fails.
pub struct FailingNewsSource;

#[async_trait]
impl NewsSource for FailingNewsSource {
    async fn top_headlines(&self, _request: &HeadlinesRequest) -> Result<Vec<Article>, AppError> {
        Err(AppError::upstream(
            "Error fetching articles",
            json!({ "status": 500 }),
        ))
    }
}

pub struct TestContext {
    pub state: AppState,
    pub rx: mpsc::Receiver<AccessEvent>,
    pub store: Arc<MemoryStore>,
}

pub fn create_test_state(source: Arc<dyn NewsSource>, analytics_file: &Path) -> TestContext {
    let clock = Arc::new(SystemClock);
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);

    let shortener = Arc::new(ShortenerService::new(store.clone(), BASE_URL));
    let news_service = Arc::new(NewsService::new(
        source,
        shortener.clone(),
        TtlCache::new(Duration::minutes(10), clock.clone()),
    ));
    let analytics_service = Arc::new(AnalyticsService::new(
        analytics_file,
        TtlCache::new(Duration::hours(1), clock),
    ));

    let state = AppState::new(
        shortener,
        news_service,
        analytics_service,
        store.clone(),
        tx,
        BASE_DOMAIN,
    );

    TestContext { state, rx, store }
}

/// Inserts a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn access_line(url: &str, status: u16) -> String {
    AccessEvent {
        date: Utc::now(),
        http_version: "1.1".to_string(),
        method: "GET".to_string(),
        referrer: None,
        ip: Some("198.51.100.7".to_string()),
        response_time_ms: 4.5,
        status,
        url: url.to_string(),
        user_agent: "curl/8.5.0".to_string(),
    }
    .to_line()
    .unwrap()
}

pub async fn stored_value(store: &MemoryStore, key: &str) -> Option<String> {
    store.get(key).await.unwrap()
}
