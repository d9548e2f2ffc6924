//! newsapi.org v2 client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::entities::{Article, HeadlinesRequest};
use crate::domain::repositories::NewsSource;
use crate::error::AppError;

/// Country queried when a request names no country, category or search term.
pub const FALLBACK_COUNTRY: &str = "us";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_ATTEMPTS: usize = 2;

#[derive(Debug, Error)]
pub enum NewsApiError {
    #[error("News API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("News API returned {status}: {code} ({message})")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },
}

impl NewsApiError {
    /// Timeouts, connection failures and upstream 5xx are worth another try.
    fn is_transient(&self) -> bool {
        match self {
            NewsApiError::Transport(e) => e.is_timeout() || e.is_connect(),
            NewsApiError::Api { status, .. } => status.is_server_error(),
        }
    }
}

impl From<NewsApiError> for AppError {
    fn from(e: NewsApiError) -> Self {
        let details = match &e {
            NewsApiError::Transport(inner) => json!({ "reason": inner.to_string() }),
            NewsApiError::Api {
                status,
                code,
                message,
            } => json!({ "status": status.as_u16(), "code": code, "message": message }),
        };
        AppError::upstream("Error fetching articles", details)
    }
}

#[derive(Debug, Deserialize)]
struct TopHeadlinesResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    source: RawSource,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    name: Option<String>,
}

impl RawArticle {
    /// Articles without a title or link are useless in a listing and dropped.
    fn into_article(self) -> Option<Article> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        Some(Article::new(
            self.source.name.unwrap_or_else(|| "Unknown source".to_string()),
            title,
            self.description.filter(|d| !d.trim().is_empty()),
            url,
            self.published_at,
        ))
    }
}

/// HTTP client for the `top-headlines` endpoint.
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, NewsApiError> {
        let client = Client::builder()
            .user_agent(concat!("getnews/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Query string sent upstream for `request`.
    pub fn query_params(request: &HeadlinesRequest) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);

        match request.country {
            Some(country) => params.push(("country", country.as_str().to_string())),
            None if request.category.is_none() && request.query.is_none() => {
                params.push(("country", FALLBACK_COUNTRY.to_string()))
            }
            None => {}
        }
        if let Some(category) = &request.category {
            params.push(("category", category.clone()));
        }
        if let Some(query) = &request.query {
            params.push(("q", query.clone()));
        }
        params.push(("pageSize", request.page_size.to_string()));
        params.push(("page", request.page.to_string()));
        params
    }

    async fn fetch(&self, request: &HeadlinesRequest) -> Result<Vec<Article>, NewsApiError> {
        let url = format!("{}/top-headlines", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&Self::query_params(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorResponse>().await.unwrap_or(ErrorResponse {
                code: "unknown".to_string(),
                message: String::new(),
            });
            return Err(NewsApiError::Api {
                status,
                code: body.code,
                message: body.message,
            });
        }

        let body = response.json::<TopHeadlinesResponse>().await?;
        Ok(body
            .articles
            .into_iter()
            .filter_map(RawArticle::into_article)
            .collect())
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn top_headlines(&self, request: &HeadlinesRequest) -> Result<Vec<Article>, AppError> {
        // 100ms, then 1s, each jittered.
        let strategy = ExponentialBackoff::from_millis(10)
            .factor(10)
            .map(jitter)
            .take(RETRY_ATTEMPTS);

        let articles = RetryIf::spawn(
            strategy,
            || self.fetch(request),
            |e: &NewsApiError| {
                let retry = e.is_transient();
                if retry {
                    warn!("Retrying News API request: {}", e);
                }
                retry
            },
        )
        .await?;

        debug!("News API returned {} articles", articles.len());
        Ok(articles)
    }
}
