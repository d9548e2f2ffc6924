//! Upstream news provider clients.

mod news_api;

pub use news_api::{FALLBACK_COUNTRY, NewsApiClient, NewsApiError};
