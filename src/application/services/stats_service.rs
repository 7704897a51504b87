//! Statistics over the whole post list.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::aggregates::{self, PostsSummary};
use crate::domain::entities::Post;
use crate::domain::repositories::PostRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, SUMMARY_KEY};

/// Service computing the post list summary (total likes, favorite post,
/// most prolific and most liked authors).
///
/// The summary is cached as JSON; post mutations must call
/// [`StatsService::invalidate`]. Each invalidation bumps a generation counter
/// so a summary computed from an older snapshot never stays in the cache.
pub struct StatsService<R: PostRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    generation: AtomicU64,
}

impl<R: PostRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            repository,
            cache,
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the summary over all posts, from cache when available.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Cache errors are
    /// logged and ignored.
    pub async fn summary(&self) -> Result<PostsSummary<Post>, AppError> {
        if let Ok(Some(cached)) = self.cache.get(SUMMARY_KEY).await {
            match serde_json::from_str(&cached) {
                Ok(summary) => return Ok(summary),
                Err(e) => tracing::warn!(error = %e, "Discarding unreadable cached summary"),
            }
        }

        let generation = self.generation.load(Ordering::Acquire);
        let posts = self.repository.list().await?;
        let summary = aggregates::summarize(&posts);

        if self.generation.load(Ordering::Acquire) == generation {
            self.store(&summary).await;

            // An invalidation that raced the write may have run before it landed.
            if self.generation.load(Ordering::Acquire) != generation {
                self.drop_cached().await;
            }
        }

        Ok(summary)
    }

    /// Drops the cached summary after the post list changed.
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.drop_cached().await;
    }

    async fn store(&self, summary: &PostsSummary<Post>) {
        match serde_json::to_string(summary) {
            Ok(json) => {
                if let Err(e) = self.cache.set(SUMMARY_KEY, &json, None).await {
                    tracing::warn!(error = %e, "Failed to cache summary");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize summary"),
        }
    }

    async fn drop_cached(&self) {
        if let Err(e) = self.cache.invalidate(SUMMARY_KEY).await {
            tracing::warn!(error = %e, "Failed to invalidate cached summary");
        }
    }
}
