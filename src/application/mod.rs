//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the store, the
//! news source and the caches. Services consume repository traits and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Shortlink get-or-create and lookup
//! - [`services::news_service::NewsService`] - Cached headlines with shortened links
//! - [`services::analytics_service::AnalyticsService`] - Access log read-back

pub mod services;
