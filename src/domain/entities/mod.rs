//! Core domain entities.
//!
//! - [`Article`] - A news article as returned by the news source
//! - [`HeadlinesRequest`] - Parameters of one headlines lookup, built from a parsed query

pub mod article;
pub mod headlines;

pub use article::Article;
pub use headlines::{DEFAULT_PAGE_SIZE, HeadlinesRequest};
