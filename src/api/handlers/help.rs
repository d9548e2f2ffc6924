//! Handler for usage instructions.

use axum::{http::HeaderMap, response::Response};

use super::{is_terminal_client, text_response};
use crate::render;

/// Lists the accepted arguments, categories and countries.
///
/// # Endpoint
///
/// `GET /help`
pub async fn help_handler(headers: HeaderMap) -> Response {
    text_response(render::format_help(is_terminal_client(&headers)))
}
