//! Upstream news provider interface.

use crate::domain::entities::{Article, HeadlinesRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Source of news headlines.
///
/// # Implementations
///
/// - [`crate::infrastructure::news::NewsApiClient`] - newsapi.org HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetches the headlines matching `request`, in the order the provider
    /// ranks them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the provider cannot be reached or
    /// rejects the request.
    async fn top_headlines(&self, request: &HeadlinesRequest) -> Result<Vec<Article>, AppError>;
}
