//! Usage analytics read back from the access log.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::access_event::AccessEvent;
use crate::error::AppError;
use crate::infrastructure::cache::TtlCache;

/// Serves the parsed contents of the analytics file.
///
/// Parsing the whole file is expensive, so the result is cached; new requests
/// show up once the cache entry expires.
pub struct AnalyticsService {
    path: PathBuf,
    cache: TtlCache<PathBuf, Arc<Vec<AccessEvent>>>,
}

impl AnalyticsService {
    pub fn new(path: impl Into<PathBuf>, cache: TtlCache<PathBuf, Arc<Vec<AccessEvent>>>) -> Self {
        Self {
            path: path.into(),
            cache,
        }
    }

    /// Returns every recorded access event, oldest first.
    ///
    /// A missing file means nothing has been recorded yet. Lines that are not
    /// valid events are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the file exists but cannot be read.
    pub async fn entries(&self) -> Result<Arc<Vec<AccessEvent>>, AppError> {
        if let Some(entries) = self.cache.get(&self.path) {
            return Ok(entries);
        }

        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(AppError::storage(
                    "Error reading analytics",
                    json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
                ));
            }
        };

        let entries = Arc::new(parse_lines(&contents));
        debug!("Loaded {} analytics entries", entries.len());
        self.cache.insert(self.path.clone(), entries.clone());
        Ok(entries)
    }
}

fn parse_lines(contents: &str) -> Vec<AccessEvent> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping malformed analytics line {}: {}", n + 1, e);
                None
            }
        })
        .collect()
}
