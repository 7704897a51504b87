//! Optional cache for the statistics summary.
//!
//! [`RedisCache`] is used when `REDIS_URL` is configured, [`NullCache`] otherwise.

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService, SUMMARY_KEY};
