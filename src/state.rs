//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, NewsService, ShortenerService};
use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::ShortCodeStore;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub news_service: Arc<NewsService>,
    pub analytics_service: Arc<AnalyticsService>,
    /// Same store the shortener writes to, kept here for health checks.
    pub store: Arc<dyn ShortCodeStore>,
    pub access_sender: mpsc::Sender<AccessEvent>,
    /// Host of the public URL; everything left of it in `Host` is a subdomain.
    pub base_domain: String,
}

impl AppState {
    pub fn new(
        shortener: Arc<ShortenerService>,
        news_service: Arc<NewsService>,
        analytics_service: Arc<AnalyticsService>,
        store: Arc<dyn ShortCodeStore>,
        access_sender: mpsc::Sender<AccessEvent>,
        base_domain: impl Into<String>,
    ) -> Self {
        Self {
            shortener,
            news_service,
            analytics_service,
            store,
            access_sender,
            base_domain: base_domain.into(),
        }
    }
}
