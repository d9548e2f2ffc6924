//! HTTP layer.
//!
//! This layer translates HTTP requests into domain operations and formats
//! responses as text tables or JSON.
//!
//! # Modules
//!
//! - [`dto`] - JSON response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Access logging, rate limiting and tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
