//! Redis-backed shortlink store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

use crate::config::mask_connection_string;
use crate::domain::repositories::{ShortCodeStore, StoreError, StoreResult};

/// Shortlink store on a shared Redis instance.
///
/// Unlike a cache, every failure is surfaced to the caller: a lost write here
/// would hand out a code that resolves to nothing.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", mask_connection_string(redis_url));

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

fn op_error(op: &str, key: &str, e: redis::RedisError) -> StoreError {
    error!("Redis {} error for {}: {}", op, key, e);
    StoreError::Operation(format!("{} {}: {}", op, key, e))
}

#[async_trait]
impl ShortCodeStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        let value = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| op_error("GET", key, e))?;
        debug!("Redis GET {} -> {}", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| op_error("SET", key, e))
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        // SET NX replies OK on success and nil when the key already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| op_error("SET NX", key, e))?;

        let written = reply.is_some();
        debug!("Redis SET NX {} -> {}", key, written);
        Ok(written)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()> {
        let mut conn = self.client.clone();
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        conn.expire::<_, ()>(key, ttl)
            .await
            .map_err(|e| op_error("EXPIRE", key, e))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        let deleted = conn
            .del::<_, i32>(key)
            .await
            .map_err(|e| op_error("DEL", key, e))?;
        if deleted > 0 {
            debug!("Redis DEL {}", key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
