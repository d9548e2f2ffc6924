//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the external collaborators the service is composed
//! with. Concrete implementations live in `crate::infrastructure`, and mock
//! implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`ShortCodeStore`] - Key-value persistence for shortlinks
//! - [`NewsSource`] - Upstream news headlines

pub mod news_source;
pub mod shortcode_store;

pub use news_source::NewsSource;
pub use shortcode_store::{ShortCodeStore, StoreError, StoreResult};

#[cfg(test)]
pub use news_source::MockNewsSource;
#[cfg(test)]
pub use shortcode_store::MockShortCodeStore;
