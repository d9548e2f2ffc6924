//! Handlers for the headline listings.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use tracing::debug;

use super::{is_terminal_client, text_response};
use crate::domain::entities::HeadlinesRequest;
use crate::domain::query::{ParsedQuery, parse_args, parse_subdomain};
use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use crate::utils::extract_domain::extract_subdomains;

/// Top headlines for the country named by the subdomain.
///
/// # Endpoint
///
/// `GET /`
///
/// # Errors
///
/// Returns 400 if the subdomain is not a known country.
pub async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    respond(&state, &headers, None).await
}

/// Headlines for a comma-delimited argument string.
///
/// # Endpoint
///
/// `GET /{args}`, e.g. `GET /climate+change,category=science,n=5`
///
/// # Request Flow
///
/// 1. Resolve the country from the Host subdomain
/// 2. Parse and validate the argument string
/// 3. Fetch (or reuse cached) headlines with shortened links
/// 4. Render a text table, colored for terminal clients
///
/// # Errors
///
/// - 400 with the validation message for a bad country or argument
/// - 500 with a generic message if the news API or the store fails
pub async fn args_handler(
    State(state): State<AppState>,
    Path(args): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    respond(&state, &headers, Some(&args)).await
}

async fn respond(
    state: &AppState,
    headers: &HeaderMap,
    args: Option<&str>,
) -> Result<Response, AppError> {
    let subdomains = extract_subdomains(headers, &state.base_domain);
    let country = parse_subdomain(subdomains.as_slice())?;

    let parsed = match args {
        Some(args) => parse_args(args)?,
        None => ParsedQuery::default(),
    };
    debug!(?country, ?parsed, "Parsed request");

    let request = HeadlinesRequest::from_query(&parsed, country);
    let mut articles = state.news_service.headlines(&request).await?;
    if parsed.flag("reverse") {
        articles.reverse();
    }

    let color = is_terminal_client(headers) && !parsed.flag("nocolor");
    Ok(text_response(render::format_articles(&articles, color)))
}
