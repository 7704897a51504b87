//! Post listing, creation, update and deletion.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::auth_service::AuthenticatedUser;
use crate::domain::entities::{NewPost, Post, PostPatch, likes_in_range};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Fields accepted when creating a post. `likes` defaults to 0 and must lie
/// within `0..=MAX_LIKES`.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: Option<i64>,
}

/// Service for managing posts and enforcing ownership.
pub struct PostService<R: PostRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: PostRepository + ?Sized> PostService<R> {
    /// Creates a new post service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists all posts in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.repository.list().await
    }

    /// Number of stored posts.
    pub async fn count_posts(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Retrieves one post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has this id.
    pub async fn get_post(&self, id: i64) -> Result<Post, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
    }

    /// Creates a post owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `likes` is negative.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_post(
        &self,
        owner: &AuthenticatedUser,
        input: PostInput,
    ) -> Result<Post, AppError> {
        let likes = input.likes.unwrap_or(0);
        if !likes_in_range(likes) {
            return Err(AppError::bad_request(
                "likes must be between 0 and 2147483647",
                json!({ "field": "likes" }),
            ));
        }

        let post = self
            .repository
            .create(NewPost {
                title: input.title,
                author: input.author,
                url: input.url,
                likes,
                user_id: Some(owner.id),
            })
            .await?;

        tracing::info!(post_id = post.id, user_id = owner.id, "Post created");

        Ok(post)
    }

    /// Partially updates a post. Any authenticated user may update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty or `likes` is negative.
    /// Returns [`AppError::NotFound`] if no post has this id.
    pub async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "No fields to update",
                json!({ "id": id }),
            ));
        }
        if patch.likes.is_some_and(|likes| !likes_in_range(likes)) {
            return Err(AppError::bad_request(
                "likes must be between 0 and 2147483647",
                json!({ "field": "likes" }),
            ));
        }

        let post = self.repository.update(id, patch).await?;
        tracing::info!(post_id = post.id, likes = post.likes, "Post updated");

        Ok(post)
    }

    /// Deletes a post on behalf of `requester`.
    ///
    /// Only the owner may delete an owned post. Posts without an owner may be
    /// deleted by any authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has this id.
    /// Returns [`AppError::Forbidden`] if another user owns the post.
    pub async fn delete_post(&self, id: i64, requester: &AuthenticatedUser) -> Result<(), AppError> {
        let post = self.get_post(id).await?;

        if let Some(owner_id) = post.owner_id()
            && owner_id != requester.id
        {
            return Err(AppError::forbidden(
                "only the creator can delete a post",
                json!({ "id": id }),
            ));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Post not found", json!({ "id": id })));
        }

        tracing::info!(post_id = id, user_id = requester.id, "Post deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PostOwner;
    use crate::domain::repositories::MockPostRepository;
    use chrono::Utc;

    fn caller(id: i64) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: format!("user{id}"),
        }
    }

    fn post(id: i64, owner: Option<i64>) -> Post {
        Post {
            id,
            title: "Go To Statement Considered Harmful".to_string(),
            author: "Edsger W. Dijkstra".to_string(),
            url: "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html"
                .to_string(),
            likes: 5,
            user: owner.map(|id| PostOwner {
                id,
                username: format!("user{id}"),
                name: "Test".to_string(),
            }),
            created_at: Utc::now(),
        }
    }

    fn input(likes: Option<i64>) -> PostInput {
        PostInput {
            title: "Type wars".to_string(),
            author: "Robert C. Martin".to_string(),
            url: "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html".to_string(),
            likes,
        }
    }

    #[tokio::test]
    async fn test_create_post_defaults_likes_to_zero() {
        let mut repo = MockPostRepository::new();

        repo.expect_create()
            .withf(|new_post| new_post.likes == 0 && new_post.user_id == Some(3))
            .times(1)
            .returning(|new_post| {
                Ok(Post {
                    id: 1,
                    title: new_post.title,
                    author: new_post.author,
                    url: new_post.url,
                    likes: new_post.likes,
                    user: None,
                    created_at: Utc::now(),
                })
            });

        let service = PostService::new(Arc::new(repo));

        let created = service.create_post(&caller(3), input(None)).await.unwrap();

        assert_eq!(created.likes, 0);
        assert_eq!(created.title, "Type wars");
    }

    #[tokio::test]
    async fn test_create_post_rejects_negative_likes() {
        let mut repo = MockPostRepository::new();
        repo.expect_create().never();

        let service = PostService::new(Arc::new(repo));

        let result = service.create_post(&caller(3), input(Some(-1))).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_post_rejects_likes_above_max() {
        let mut repo = MockPostRepository::new();
        repo.expect_create().never();

        let service = PostService::new(Arc::new(repo));

        let result = service
            .create_post(&caller(3), input(Some(crate::domain::entities::MAX_LIKES + 1)))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repo));

        let result = service.get_post(99).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_post_rejects_empty_patch() {
        let mut repo = MockPostRepository::new();
        repo.expect_update().never();

        let service = PostService::new(Arc::new(repo));

        let result = service.update_post(1, PostPatch::default()).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_post_likes() {
        let mut repo = MockPostRepository::new();
        repo.expect_update()
            .withf(|id, patch| *id == 1 && patch.likes == Some(22))
            .times(1)
            .returning(|id, patch| {
                let mut updated = post(id, None);
                patch.apply(&mut updated);
                Ok(updated)
            });

        let service = PostService::new(Arc::new(repo));

        let updated = service
            .update_post(
                1,
                PostPatch {
                    likes: Some(22),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.likes, 22);
    }

    #[tokio::test]
    async fn test_delete_own_post() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(post(id, Some(3)))));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let service = PostService::new(Arc::new(repo));

        assert!(service.delete_post(1, &caller(3)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_other_users_post_forbidden() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(post(id, Some(3)))));
        repo.expect_delete().never();

        let service = PostService::new(Arc::new(repo));

        let result = service.delete_post(1, &caller(4)).await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_delete_ownerless_post_allowed() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(post(id, None))));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let service = PostService::new(Arc::new(repo));

        assert!(service.delete_post(1, &caller(4)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = PostService::new(Arc::new(repo));

        let result = service.delete_post(1, &caller(4)).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
