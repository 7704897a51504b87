//! DTOs for user registration and listing.

use serde::{Deserialize, Serialize};

use crate::application::services::UserWithPosts;
use crate::domain::entities::{Post, Registration, User};

/// Request body for `POST /api/users`.
///
/// Validation happens in the service so the admin CLI shares the rules.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

impl From<CreateUserRequest> for Registration {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            name: req.name,
            password: req.password,
        }
    }
}

/// Post summary embedded in a user listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserPostResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}

impl From<Post> for UserPostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            url: post.url,
            likes: post.likes,
        }
    }
}

/// A user as returned by the API. The password hash is never exposed.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub posts: Vec<UserPostResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            posts: Vec::new(),
        }
    }
}

impl From<UserWithPosts> for UserResponse {
    fn from(entry: UserWithPosts) -> Self {
        Self {
            posts: entry.posts.into_iter().map(UserPostResponse::from).collect(),
            ..Self::from(entry.user)
        }
    }
}
