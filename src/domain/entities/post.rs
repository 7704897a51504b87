//! Post entity: a shared reference to an external article.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of the user who added a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOwner {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// Upper bound for `likes`, matching the `posts_likes_range` check.
pub const MAX_LIKES: i64 = i32::MAX as i64;

/// Whether `likes` fits the stored range `0..=MAX_LIKES`.
pub fn likes_in_range(likes: i64) -> bool {
    (0..=MAX_LIKES).contains(&likes)
}

/// A stored blog post reference.
///
/// `likes` stays within `0..=MAX_LIKES`; the database enforces it with a
/// check constraint and the API rejects other input before it gets there.
/// `user` is `None` for posts whose owner has been removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: Option<PostOwner>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Returns true if `user_id` owns this post.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user.as_ref().is_some_and(|u| u.id == user_id)
    }

    /// Id of the owning user, if any.
    pub fn owner_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

/// Input data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user_id: Option<i64>,
}

/// Partial update for an existing post.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl PostPatch {
    /// Applies the patch to `post` in place.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(url) = self.url {
            post.url = url;
        }
        if let Some(likes) = self.likes {
            post.likes = likes;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.url.is_none() && self.likes.is_none()
    }
}
