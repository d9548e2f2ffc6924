//! Headlines request built from a validated query.

use crate::domain::query::{CountryCode, ParsedQuery};

/// Number of articles returned when `n` is not given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Parameters for one upstream headlines lookup.
///
/// Hashable so it can key the news cache: two requests that would hit the
/// upstream API with identical parameters share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadlinesRequest {
    pub country: Option<CountryCode>,
    pub category: Option<String>,
    pub query: Option<String>,
    pub page_size: u32,
    pub page: u32,
}

impl Default for HeadlinesRequest {
    fn default() -> Self {
        Self {
            country: None,
            category: None,
            query: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl HeadlinesRequest {
    /// Builds the upstream request for a parsed query and resolved country.
    ///
    /// Presentation-only arguments (`reverse`, `nocolor`) do not affect the
    /// request.
    pub fn from_query(parsed: &ParsedQuery, country: Option<CountryCode>) -> Self {
        Self {
            country,
            category: parsed.str("category").map(str::to_string),
            query: parsed.query.clone(),
            page_size: parsed.int("n").unwrap_or(DEFAULT_PAGE_SIZE),
            page: parsed.int("page").unwrap_or(1),
        }
    }
}
