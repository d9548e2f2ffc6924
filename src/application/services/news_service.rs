//! Headline fetching with shortened article links.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::ShortenerService;
use crate::domain::entities::{Article, HeadlinesRequest};
use crate::domain::repositories::NewsSource;
use crate::error::AppError;
use crate::infrastructure::cache::TtlCache;

/// Fetches headlines from the news source and replaces every article URL with
/// a shortlink.
///
/// Results are cached per [`HeadlinesRequest`] for the lifetime of the cache,
/// so repeated queries within that window never reach the upstream API.
pub struct NewsService {
    source: Arc<dyn NewsSource>,
    shortener: Arc<ShortenerService>,
    cache: TtlCache<HeadlinesRequest, Vec<Article>>,
}

impl NewsService {
    pub fn new(
        source: Arc<dyn NewsSource>,
        shortener: Arc<ShortenerService>,
        cache: TtlCache<HeadlinesRequest, Vec<Article>>,
    ) -> Self {
        Self {
            source,
            shortener,
            cache,
        }
    }

    /// Returns the headlines for `request` with shortened URLs.
    ///
    /// # Errors
    ///
    /// - [`AppError::Upstream`] if the news source fails
    /// - [`AppError::Storage`] if an article URL cannot be shortened
    ///
    /// Failed lookups are not cached.
    pub async fn headlines(&self, request: &HeadlinesRequest) -> Result<Vec<Article>, AppError> {
        if let Some(articles) = self.cache.get(request) {
            metrics::counter!("news_cache_hits_total").increment(1);
            debug!("News cache HIT for {:?}", request);
            return Ok(articles);
        }
        debug!("News cache MISS for {:?}", request);

        let fetched = self.source.top_headlines(request).await?;

        let mut articles = Vec::with_capacity(fetched.len());
        for article in fetched {
            let short = self.shortener.get_shortened_url(&article.url).await?;
            articles.push(article.with_url(short));
        }

        self.cache.insert(request.clone(), articles.clone());
        Ok(articles)
    }

    /// Drops expired cache entries, returning how many were removed.
    pub fn purge_cache(&self) -> usize {
        self.cache.purge_expired()
    }
}
