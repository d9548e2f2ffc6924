//! In-process store used for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::debug;

use crate::domain::repositories::{ShortCodeStore, StoreResult};
use crate::utils::clock::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct Record {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Record {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// A [`ShortCodeStore`] that keeps everything in a concurrent map.
///
/// Honors expiry the way Redis does: an expired key reads as missing and can be
/// written again with [`ShortCodeStore::set_if_absent`]. Expired records stay in
/// memory until [`MemoryStore::purge_expired`] sweeps them. Data does not survive
/// a restart, so this is only used when Redis is not configured or unreachable.
pub struct MemoryStore {
    records: DashMap<String, Record>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Creates an empty store on wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        debug!("Using MemoryStore (shortlinks are not persisted)");
        Self {
            records: DashMap::new(),
            clock,
        }
    }

    /// Number of live keys whose name starts with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        let now = self.clock.now();
        self.records
            .iter()
            .filter(|r| r.key().starts_with(prefix) && r.value().is_live(now))
            .count()
    }

    /// Drops every expired record and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.records.retain(|_, record| {
            let live = record.is_live(now);
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    fn expiry(&self, ttl_seconds: u64) -> DateTime<Utc> {
        let now = self.clock.now();
        i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShortCodeStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = self.clock.now();
        Ok(self
            .records
            .get(key)
            .filter(|record| record.is_live(now))
            .map(|record| record.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.records.insert(
            key.to_string(),
            Record {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<bool> {
        let now = self.clock.now();
        let record = Record {
            value: value.to_string(),
            expires_at: Some(self.expiry(ttl_seconds)),
        };

        match self.records.entry(key.to_string()) {
            Entry::Occupied(existing) if existing.get().is_live(now) => Ok(false),
            Entry::Occupied(mut expired) => {
                expired.insert(record);
                Ok(true)
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(true)
            }
        }
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()> {
        let expires_at = self.expiry(ttl_seconds);
        if let Some(mut record) = self.records.get_mut(key) {
            record.expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.records.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
