//! Caching layer for upstream results.
//!
//! Provides [`TtlCache`], an explicit cache component constructed once at start-up
//! and handed to the services that need it.

mod ttl_cache;

pub use ttl_cache::TtlCache;
