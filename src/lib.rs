//! # getnews
//!
//! News headlines for the terminal, served over plain HTTP and built with Axum.
//!
//! ```bash
//! curl getnews.tech
//! curl gb.getnews.tech/brexit,n=5
//! curl getnews.tech/help
//! ```
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Query grammar, entities and collaborator traits
//! - **Application Layer** ([`application`]) - Headline lookup, shortlinks and analytics
//! - **Infrastructure Layer** ([`infrastructure`]) - News API client, shortlink stores, caches
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//! - **Rendering** ([`render`]) - Bordered text tables with optional ANSI color
//!
//! ## Features
//!
//! - Country selection by subdomain, query arguments in the path
//! - Every article link replaced by a shortlink on this host
//! - Concurrency-safe shortlink minting backed by Redis or process memory
//! - Cached upstream responses
//! - Access analytics written asynchronously to a JSON-lines file
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export NEWS_API_KEY="..."
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod render;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AnalyticsService, NewsService, ShortenerService};
    pub use crate::domain::access_event::AccessEvent;
    pub use crate::domain::entities::{Article, HeadlinesRequest};
    pub use crate::domain::query::{CountryCode, ParsedQuery, parse_args, parse_subdomain};
    pub use crate::domain::repositories::{NewsSource, ShortCodeStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::TtlCache;
    pub use crate::infrastructure::store::MemoryStore;
    pub use crate::state::AppState;
}
