//! Redis backend for [`CacheService`].

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "bloglist:";

/// Cache stored in Redis under the `bloglist:` namespace.
///
/// The [`ConnectionManager`] reconnects on its own after the server goes away.
/// Command failures are logged and treated as misses.
pub struct RedisCache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Opens a managed connection and checks it with `PING`.
    ///
    /// `default_ttl_seconds` applies to [`CacheService::set`] calls without an
    /// explicit TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`](super::CacheError::Unavailable) if the
    /// URL is malformed or the server does not answer.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        let client = Client::open(redis_url)?;
        let mut connection = ConnectionManager::new(client).await?;
        connection.ping::<()>().await?;

        info!(ttl = default_ttl_seconds, "Redis connection established");

        Ok(Self {
            connection,
            default_ttl: default_ttl_seconds,
        })
    }

    fn namespaced(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection.clone();

        let value = conn
            .get::<_, Option<String>>(Self::namespaced(key))
            .await
            .unwrap_or_else(|e| {
                warn!(key, error = %e, "Redis GET failed");
                None
            });

        debug!(key, hit = value.is_some(), "Cache lookup");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let mut conn = self.connection.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::namespaced(key), value, ttl)
            .await
        {
            warn!(key, error = %e, "Redis SETEX failed");
        }
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.connection.clone();

        match conn.del::<_, i64>(Self::namespaced(key)).await {
            Ok(removed) => debug!(key, removed, "Cache invalidated"),
            Err(e) => warn!(key, error = %e, "Redis DEL failed"),
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        conn.ping::<()>().await.is_ok()
    }
}
