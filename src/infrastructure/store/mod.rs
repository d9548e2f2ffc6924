//! [`ShortCodeStore`](crate::domain::repositories::ShortCodeStore) backends.
//!
//! - [`RedisStore`] - shared Redis instance, used in production
//! - [`MemoryStore`] - process-local map, used when no Redis URL is configured

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
