//! The cache abstraction used by the statistics service.

use async_trait::async_trait;
use thiserror::Error;

/// Key of the cached statistics summary.
pub const SUMMARY_KEY: &str = "posts:summary";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(#[from] redis::RedisError),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// String key/value store with expiry.
///
/// Values are JSON documents. A backend that cannot reach its server reports
/// a miss from [`get`](CacheService::get) and succeeds on writes, so callers
/// fall back to recomputing.
#[async_trait]
pub trait CacheService: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// `ttl_seconds = None` uses the backend default.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removing a missing key succeeds.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    async fn health_check(&self) -> bool;
}
