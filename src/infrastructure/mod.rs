//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for shortlink storage, the news provider and
//! in-process caching.
//!
//! # Modules
//!
//! - [`cache`] - TTL cache used for news and analytics results
//! - [`news`] - newsapi.org client
//! - [`store`] - Redis and in-memory shortlink stores

pub mod cache;
pub mod news;
pub mod store;
