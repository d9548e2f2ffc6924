//! Business logic services for the application layer.

pub mod analytics_service;
pub mod news_service;
pub mod shortener_service;

pub use analytics_service::AnalyticsService;
pub use news_service::NewsService;
pub use shortener_service::ShortenerService;
