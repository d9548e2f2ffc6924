//! Key-value store capability used by the URL shortener.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a [`ShortCodeStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),
    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal key-value persistence the shortener is composed with.
///
/// Implementations must give read-after-write consistency for a single key.
/// Unlike a cache, failures are propagated to the caller instead of being
/// swallowed.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store with TTL support
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortCodeStore: Send + Sync {
    /// Reads a key, returning `None` if it is missing or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a key without an expiry, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Writes a key with an expiry only if it is not already present.
    ///
    /// The check and the write happen atomically in the store. Returns `true` if
    /// the value was written, `false` if the key already held a live value.
    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<bool>;

    /// Sets the expiry of an existing key, counted from now.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()>;

    /// Removes a key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
