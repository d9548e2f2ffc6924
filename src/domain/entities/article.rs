//! Article entity returned by the news source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news article.
///
/// After passing through [`crate::application::services::NewsService`] the
/// `url` field holds a shortlink instead of the publisher's URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub source_name: String,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Creates a new Article instance.
    pub fn new(
        source_name: String,
        title: String,
        description: Option<String>,
        url: String,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            source_name,
            title,
            description,
            url,
            published_at,
        }
    }

    /// Returns a copy of the article pointing at `url`.
    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }
}
