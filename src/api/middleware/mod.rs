//! HTTP middleware for request processing and protection.
//!
//! Provides access logging, rate limiting, and request tracing.

pub mod access_log;
pub mod rate_limit;
pub mod tracing;
