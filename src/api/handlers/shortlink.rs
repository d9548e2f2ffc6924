//! Handler for shortlink redirects.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or expired.
/// Returns 500 if the store cannot be reached.
pub async fn shortlink_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    match state.shortener.get_original_url(&code).await? {
        Some(url) => {
            debug!("Redirecting {} -> {}", code, url);
            Ok(Redirect::temporary(&url))
        }
        None => Err(AppError::not_found("Shortlink not found.")),
    }
}
