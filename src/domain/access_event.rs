//! Access event model for the analytics log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One served request, as written to the analytics file.
///
/// Created by the access-log middleware after the response is produced, sent to
/// [`crate::domain::access_worker::run_access_worker`] over a bounded channel and
/// appended as a single JSON line. [`crate::application::services::AnalyticsService`]
/// reads the same lines back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEvent {
    pub date: DateTime<Utc>,
    pub http_version: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(rename = "responseTime")]
    pub response_time_ms: f64,
    pub status: u16,
    pub url: String,
    #[serde(default)]
    pub user_agent: String,
}

impl AccessEvent {
    /// Whether the event belongs in the analytics log.
    ///
    /// Only successful requests are recorded.
    pub fn is_recorded(&self) -> bool {
        self.status == 200
    }

    /// Serializes the event as one line of the analytics file (no trailing newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
