//! URL shortening with a concurrency-safe get-or-create protocol.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::repositories::ShortCodeStore;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_valid_code};

/// Key namespace used when none is configured.
pub const DEFAULT_PREFIX: &str = "getnews";

/// One year, the lifetime of every shortlink.
pub const DEFAULT_TTL_SECONDS: u64 = 60 * 60 * 24 * 365;

/// Upper bound on fresh codes tried before minting gives up.
const MAX_MINT_ATTEMPTS: usize = 32;

/// Maps long URLs to short codes and back.
///
/// Each mapping is two store keys with the same expiry:
///
/// ```text
/// {prefix}:url:{long_url} -> code
/// {prefix}:short:{code}   -> long_url
/// ```
///
/// # Guarantees
///
/// - Shortening the same URL twice yields the same shortlink while it is live
/// - Two different URLs never share a code while either is live
/// - No half-written mapping is left behind when the store fails
///
/// All minting goes through one process-wide lock. Codes and URL mappings are
/// written with [`ShortCodeStore::set_if_absent`], so several processes sharing
/// one store cannot hand out the same code either.
pub struct ShortenerService {
    store: Arc<dyn ShortCodeStore>,
    base_url: String,
    prefix: String,
    code_length: usize,
    ttl_seconds: u64,
    mint_lock: Mutex<()>,
}

impl ShortenerService {
    /// Creates a shortener issuing links under `base_url` (e.g. `https://getnews.tech`).
    pub fn new(store: Arc<dyn ShortCodeStore>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            base_url,
            prefix: DEFAULT_PREFIX.to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            mint_lock: Mutex::new(()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the shortlink for `url`, minting a code on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store fails or no free code is found.
    /// Nothing is left in the store for `url` in that case.
    pub async fn get_shortened_url(&self, url: &str) -> Result<String, AppError> {
        let _guard = self.mint_lock.lock().await;

        let url_key = self.url_key(url);
        if let Some(code) = self.store.get(&url_key).await? {
            debug!("Shortlink exists for {}", url);
            return Ok(self.shortlink(&code));
        }

        let code = self.reserve_code(url).await?;

        match self
            .store
            .set_if_absent(&url_key, &code, self.ttl_seconds)
            .await
        {
            Ok(true) => {
                metrics::counter!("shortlinks_minted_total").increment(1);
                info!("Minted shortlink {} for {}", code, url);
                Ok(self.shortlink(&code))
            }
            Ok(false) => {
                // Another process mapped the URL between our read and write.
                self.release_code(&code).await;
                let winner = self.store.get(&url_key).await?.ok_or_else(|| {
                    AppError::storage(
                        "Shortlink mapping vanished",
                        json!({ "url": url, "reason": "expired between writes" }),
                    )
                })?;
                debug!("Lost mint race for {}, using {}", url, winner);
                Ok(self.shortlink(&winner))
            }
            Err(e) => {
                self.release_code(&code).await;
                Err(e.into())
            }
        }
    }

    /// Looks up the long URL behind `code`.
    ///
    /// Unknown, expired and malformed codes all yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] only if the store fails.
    pub async fn get_original_url(&self, code: &str) -> Result<Option<String>, AppError> {
        if !is_valid_code(code) {
            return Ok(None);
        }
        Ok(self.store.get(&self.short_key(code)).await?)
    }

    /// Claims a fresh code for `url` in the store.
    async fn reserve_code(&self, url: &str) -> Result<String, AppError> {
        for _ in 0..MAX_MINT_ATTEMPTS {
            let code = generate_code(self.code_length);
            if self
                .store
                .set_if_absent(&self.short_key(&code), url, self.ttl_seconds)
                .await?
            {
                return Ok(code);
            }
            metrics::counter!("shortlink_collisions_total").increment(1);
            debug!("Short code collision on {}", code);
        }

        Err(AppError::storage(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_MINT_ATTEMPTS }),
        ))
    }

    /// Deletes a reserved code that will not be used.
    async fn release_code(&self, code: &str) {
        if let Err(e) = self.store.delete(&self.short_key(code)).await {
            // The orphaned code points at a real URL and expires with its TTL.
            warn!("Failed to release short code {}: {}", code, e);
        }
    }

    fn url_key(&self, url: &str) -> String {
        format!("{}:url:{}", self.prefix, url)
    }

    fn short_key(&self, code: &str) -> String {
        format!("{}:short:{}", self.prefix, code)
    }

    fn shortlink(&self, code: &str) -> String {
        format!("{}/s/{}", self.base_url, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockShortCodeStore, StoreError};
    use crate::error::ErrorKind;
    use crate::infrastructure::store::MemoryStore;
    use crate::utils::clock::ManualClock;

    const BASE: &str = "https://getnews.tech";

    fn code_of(shortlink: &str) -> &str {
        shortlink.rsplit('/').next().unwrap()
    }

    fn memory_service() -> (ShortenerService, Arc<MemoryStore>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(MemoryStore::with_clock(clock.clone()));
        let service = ShortenerService::new(store.clone(), BASE);
        (service, store, clock)
    }

    #[tokio::test]
    async fn test_shortlink_format() {
        let (service, _store, _clock) = memory_service();
        let link = service.get_shortened_url("https://example.com/a").await.unwrap();

        assert!(link.starts_with("https://getnews.tech/s/"));
        let code = code_of(&link);
        assert_eq!(code.len(), DEFAULT_CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_same_url_same_shortlink() {
        let (service, store, _clock) = memory_service();
        let first = service.get_shortened_url("https://example.com/a").await.unwrap();
        let second = service.get_shortened_url("https://example.com/a").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.count_prefix("getnews:short:"), 1);
        assert_eq!(store.count_prefix("getnews:url:"), 1);
    }

    #[tokio::test]
    async fn test_distinct_urls_distinct_codes() {
        let (service, _store, _clock) = memory_service();
        let a = service.get_shortened_url("https://example.com/a").await.unwrap();
        let b = service.get_shortened_url("https://example.com/b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (service, _store, _clock) = memory_service();
        let url = "https://example.com/path?q=1,2";
        let link = service.get_shortened_url(url).await.unwrap();

        let original = service.get_original_url(code_of(&link)).await.unwrap();
        assert_eq!(original.as_deref(), Some(url));
    }

    #[tokio::test]
    async fn test_unknown_code_is_none() {
        let (service, _store, _clock) = memory_service();
        assert_eq!(service.get_original_url("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_mapping_is_reissued() {
        let (service, _store, clock) = memory_service();
        let url = "https://example.com/old";
        let first = service.get_shortened_url(url).await.unwrap();

        clock.advance(chrono::Duration::seconds(DEFAULT_TTL_SECONDS as i64 + 1));
        assert_eq!(service.get_original_url(code_of(&first)).await.unwrap(), None);

        let second = service.get_shortened_url(url).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(
            service.get_original_url(code_of(&second)).await.unwrap().as_deref(),
            Some(url)
        );
    }

    #[tokio::test]
    async fn test_concurrent_calls_mint_once() {
        let (service, store, _clock) = memory_service();
        let service = Arc::new(service);

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    service.get_shortened_url("https://example.com/hot").await
                })
            })
            .collect();

        let mut links = Vec::new();
        for handle in handles {
            links.push(handle.await.unwrap().unwrap());
        }

        assert!(links.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.count_prefix("getnews:short:"), 1);
    }

    #[tokio::test]
    async fn test_custom_prefix_length_and_base_url() {
        let store = Arc::new(MemoryStore::new());
        let service = ShortenerService::new(store.clone(), "http://localhost:5000/")
            .with_prefix("dev")
            .with_code_length(8)
            .with_ttl_seconds(60);

        let link = service.get_shortened_url("https://example.com").await.unwrap();
        assert!(link.starts_with("http://localhost:5000/s/"));
        assert_eq!(code_of(&link).len(), 8);
        assert_eq!(store.count_prefix("dev:short:"), 1);
        assert_eq!(service.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_fast_path_returns_existing_code() {
        let mut store = MockShortCodeStore::new();
        store
            .expect_get()
            .withf(|key| key == "getnews:url:https://example.com")
            .times(1)
            .returning(|_| Ok(Some("existing1".to_string())));
        store.expect_set_if_absent().never();

        let service = ShortenerService::new(Arc::new(store), BASE);
        let link = service.get_shortened_url("https://example.com").await.unwrap();
        assert_eq!(link, "https://getnews.tech/s/existing1");
    }

    #[tokio::test]
    async fn test_collision_regenerates_code() {
        let mut store = MockShortCodeStore::new();
        store.expect_get().returning(|_| Ok(None));

        let mut seq = mockall::Sequence::new();
        store
            .expect_set_if_absent()
            .withf(|key, _, _| key.starts_with("getnews:short:"))
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(false));
        store
            .expect_set_if_absent()
            .withf(|key, _, ttl| key.starts_with("getnews:short:") && *ttl == DEFAULT_TTL_SECONDS)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(true));
        store
            .expect_set_if_absent()
            .withf(|key, _, _| key == "getnews:url:https://example.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(true));

        let service = ShortenerService::new(Arc::new(store), BASE);
        assert!(service.get_shortened_url("https://example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_exhausted_codes_is_storage_error() {
        let mut store = MockShortCodeStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set_if_absent()
            .times(MAX_MINT_ATTEMPTS)
            .returning(|_, _, _| Ok(false));

        let service = ShortenerService::new(Arc::new(store), BASE);
        let err = service.get_shortened_url("https://example.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_failed_url_write_rolls_back_code() {
        let mut store = MockShortCodeStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set_if_absent()
            .withf(|key, _, _| key.starts_with("getnews:short:"))
            .times(1)
            .returning(|_, _, _| Ok(true));
        store
            .expect_set_if_absent()
            .withf(|key, _, _| key.starts_with("getnews:url:"))
            .times(1)
            .returning(|_, _, _| Err(StoreError::Operation("write failed".to_string())));
        store
            .expect_delete()
            .withf(|key| key.starts_with("getnews:short:"))
            .times(1)
            .returning(|_| Ok(()));

        let service = ShortenerService::new(Arc::new(store), BASE);
        let err = service.get_shortened_url("https://example.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_lost_race_returns_winner() {
        let mut store = MockShortCodeStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        store
            .expect_set_if_absent()
            .withf(|key, _, _| key.starts_with("getnews:short:"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(true));
        store
            .expect_set_if_absent()
            .withf(|key, _, _| key.starts_with("getnews:url:"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(false));
        store
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some("winner99".to_string())));

        let service = ShortenerService::new(Arc::new(store), BASE);
        let link = service.get_shortened_url("https://example.com").await.unwrap();
        assert_eq!(link, "https://getnews.tech/s/winner99");
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockShortCodeStore::new();
        store
            .expect_get()
            .returning(|_| Err(StoreError::Connection("refused".to_string())));

        let service = ShortenerService::new(Arc::new(store), BASE);
        let err = service.get_shortened_url("https://example.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err = service.get_original_url("abc123").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_malformed_code_skips_store() {
        let mut store = MockShortCodeStore::new();
        store.expect_get().never();

        let service = ShortenerService::new(Arc::new(store), BASE);
        assert_eq!(service.get_original_url("../etc").await.unwrap(), None);
        assert_eq!(service.get_original_url("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_lock_released_after_error() {
        let mut store = MockShortCodeStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::Operation("timeout".to_string())));
        store
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some("abc".to_string())));

        let service = ShortenerService::new(Arc::new(store), BASE);
        assert!(service.get_shortened_url("https://example.com").await.is_err());
        assert_eq!(
            service.get_shortened_url("https://example.com").await.unwrap(),
            "https://getnews.tech/s/abc"
        );
    }
}
