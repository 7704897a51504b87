//! DTOs for post endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::application::services::PostInput;
use crate::domain::entities::{Post, PostOwner, PostPatch};

/// Accepts absolute `http`/`https` URLs only.
fn validate_post_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("url").with_message("url must be an http(s) URL".into())),
    }
}

/// Request body for `POST /api/posts`.
///
/// `title`, `author` and `url` are required; `likes` defaults to 0.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 512, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 256, message = "author is required"))]
    pub author: String,

    #[validate(custom(function = "validate_post_url"))]
    pub url: String,

    #[validate(range(
        min = 0,
        max = 2147483647,
        message = "likes must be between 0 and 2147483647"
    ))]
    pub likes: Option<i64>,
}

impl From<CreatePostRequest> for PostInput {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        }
    }
}

/// Request body for `PUT /api/posts/{id}`.
///
/// Only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 512))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub author: Option<String>,

    #[validate(custom(function = "validate_post_url"))]
    pub url: Option<String>,

    #[validate(range(
        min = 0,
        max = 2147483647,
        message = "likes must be between 0 and 2147483647"
    ))]
    pub likes: Option<i64>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        }
    }
}

/// Public view of a post owner.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
}

impl From<PostOwner> for OwnerResponse {
    fn from(owner: PostOwner) -> Self {
        Self {
            id: owner.id,
            username: owner.username,
            name: owner.name,
        }
    }
}

/// A post as returned by the API. `user` is `null` for ownerless posts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: Option<OwnerResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            url: post.url,
            likes: post.likes,
            user: post.user.map(OwnerResponse::from),
            created_at: post.created_at,
        }
    }
}
