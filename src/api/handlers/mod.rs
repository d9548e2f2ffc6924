//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod help;
pub mod news;
pub mod shortlink;

pub use analytics::analytics_handler;
pub use health::health_handler;
pub use help::help_handler;
pub use news::{args_handler, index_handler};
pub use shortlink::shortlink_handler;

use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};

/// Whether the request comes from curl, the only client that gets ANSI colors.
pub fn is_terminal_client(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.contains("curl"))
}

pub(crate) fn text_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
