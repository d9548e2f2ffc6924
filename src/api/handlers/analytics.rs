//! Handler for usage analytics.

use axum::{Json, extract::State};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns every recorded access as JSON.
///
/// # Endpoint
///
/// `GET /analytics`
///
/// Data may be up to an hour old.
pub async fn analytics_handler(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let entries = state.analytics_service.entries().await?;
    Ok(Json(AnalyticsResponse::new(entries.as_ref().clone())))
}
