//! Process-local implementation of the post and user repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{
    NewPost, NewUser, Post, PostOwner, PostPatch, User, likes_in_range,
};
use crate::domain::repositories::{PostRepository, UserRepository};
use crate::error::AppError;

/// Post as kept in memory: owner by id, resolved on read.
#[derive(Debug, Clone)]
struct StoredPost {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<StoredPost>,
    next_user_id: i64,
    next_post_id: i64,
}

impl Tables {
    fn owner(&self, user_id: Option<i64>) -> Option<PostOwner> {
        let user_id = user_id?;
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| PostOwner {
                id: u.id,
                username: u.username.clone(),
                name: u.name.clone(),
            })
    }

    fn materialize(&self, stored: &StoredPost) -> Post {
        Post {
            id: stored.id,
            title: stored.title.clone(),
            author: stored.author.clone(),
            url: stored.url.clone(),
            likes: stored.likes,
            user: self.owner(stored.user_id),
            created_at: stored.created_at,
        }
    }
}

/// In-memory store backing both [`PostRepository`] and [`UserRepository`].
///
/// Enforces the same constraints as the PostgreSQL schema: unique usernames,
/// non-negative likes, and ids assigned in insertion order. Data is lost when
/// the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        tracing::debug!("Using in-memory storage");
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().map(|p| tables.materialize(p)).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.materialize(p)))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        if !likes_in_range(new_post.likes) {
            return Err(AppError::bad_request(
                "Check constraint violation",
                json!({ "constraint": "posts_likes_range" }),
            ));
        }

        let mut tables = self.tables.write().await;
        tables.next_post_id += 1;

        let stored = StoredPost {
            id: tables.next_post_id,
            title: new_post.title,
            author: new_post.author,
            url: new_post.url,
            likes: new_post.likes,
            user_id: new_post.user_id,
            created_at: Utc::now(),
        };
        let post = tables.materialize(&stored);
        tables.posts.push(stored);

        Ok(post)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError> {
        if patch.likes.is_some_and(|likes| !likes_in_range(likes)) {
            return Err(AppError::bad_request(
                "Check constraint violation",
                json!({ "constraint": "posts_likes_range" }),
            ));
        }

        let mut tables = self.tables.write().await;
        let stored = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))?;

        if let Some(title) = patch.title {
            stored.title = title;
        }
        if let Some(author) = patch.author {
            stored.author = author;
        }
        if let Some(url) = patch.url {
            stored.url = url;
        }
        if let Some(likes) = patch.likes {
            stored.likes = likes;
        }

        let stored = stored.clone();
        Ok(tables.materialize(&stored))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        Ok(tables.posts.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.len() as i64)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_username_key" }),
            ));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: new_user.username,
            name: new_user.name,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.clone())
    }
}
