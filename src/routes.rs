//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /`          - Top headlines for the subdomain's country
//! - `GET /{args}`    - Headlines for an argument string
//! - `GET /help`      - Usage instructions
//! - `GET /s/{code}`  - Shortlink redirect
//! - `GET /analytics` - Recorded accesses as JSON
//! - `GET /health`    - Store and access queue status
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Access log** - Combined log line per request, successful requests queued
//!   for the analytics file
//! - **Rate limiting** - Per-IP token bucket
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{access_log, rate_limit, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer socket address, so the returned service must
/// be served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::public_routes()
        .layer(middleware::from_fn_with_state(state.clone(), access_log::layer))
        .layer(rate_limit::layer())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
