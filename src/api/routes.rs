//! Public route configuration.

use crate::api::handlers::{
    analytics_handler, args_handler, health_handler, help_handler, index_handler,
    shortlink_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All routes served by the application.
///
/// # Endpoints
///
/// - `GET /`           - Top headlines for the subdomain's country
/// - `GET /help`       - Usage instructions
/// - `GET /health`     - Store and access queue status
/// - `GET /analytics`  - Recorded accesses as JSON
/// - `GET /s/{code}`   - Shortlink redirect
/// - `GET /{args}`     - Headlines for an argument string
///
/// Static paths take precedence over `/{args}`, so `help`, `health` and
/// `analytics` can never be parsed as search terms.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/help", get(help_handler))
        .route("/health", get(health_handler))
        .route("/analytics", get(analytics_handler))
        .route("/s/{code}", get(shortlink_handler))
        .route("/{args}", get(args_handler))
}
