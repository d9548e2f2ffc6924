//! DTOs for the analytics endpoint.

use serde::Serialize;

use crate::domain::access_event::AccessEvent;

/// Every recorded access, oldest first.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub total: usize,
    pub entries: Vec<AccessEvent>,
}

impl AnalyticsResponse {
    pub fn new(entries: Vec<AccessEvent>) -> Self {
        Self {
            total: entries.len(),
            entries,
        }
    }
}
