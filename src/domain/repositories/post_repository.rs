//! Storage of posts.

use async_trait::async_trait;

use crate::domain::entities::{NewPost, Post, PostPatch};
use crate::error::AppError;

/// Post storage.
///
/// Posts come back with their owner resolved. Every listing is ordered by
/// ascending id, i.e. insertion order, and the statistics rely on that for
/// tie-breaks. Backend failures surface as [`AppError::Internal`].
///
/// Backed by [`PgPostRepository`](crate::infrastructure::persistence::PgPostRepository)
/// or [`InMemoryStore`](crate::infrastructure::persistence::InMemoryStore).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Negative `likes` is rejected with [`AppError::Validation`].
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError>;

    /// Applies the fields set in `patch`; [`AppError::NotFound`] for an unknown id.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError>;

    /// `Ok(false)` when there was nothing to delete.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Also used as the storage probe of `/health`.
    async fn count(&self) -> Result<i64, AppError>;
}
