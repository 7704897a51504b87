//! User registration and listing.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use validator::Validate;

use crate::application::services::auth_service::hash_password;
use crate::domain::entities::{NewUser, Post, Registration, User};
use crate::domain::repositories::{PostRepository, UserRepository};
use crate::error::AppError;

/// A user together with the posts they own, in ascending post id order.
#[derive(Debug, Clone)]
pub struct UserWithPosts {
    pub user: User,
    pub posts: Vec<Post>,
}

/// Service for creating and listing user accounts.
pub struct UserService<U: UserRepository + ?Sized, P: PostRepository + ?Sized> {
    user_repository: Arc<U>,
    post_repository: Arc<P>,
}

impl<U: UserRepository + ?Sized, P: PostRepository + ?Sized> UserService<U, P> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<U>, post_repository: Arc<P>) -> Self {
        Self {
            user_repository,
            post_repository,
        }
    }

    /// Validates a registration, hashes its password and stores the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - username is shorter than 3 characters or has invalid characters
    /// - password is shorter than 3 characters
    /// - username is already taken
    ///
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        registration.validate()?;

        let password_hash = hash_password(&registration.password)?;

        let new_user = NewUser {
            username: registration.username,
            name: registration.name,
            password_hash,
        };

        let user = self
            .user_repository
            .create(new_user)
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::bad_request(
                    "username must be unique",
                    json!({ "field": "username" }),
                ),
                other => other,
            })?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Lists all users, each with their posts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<UserWithPosts>, AppError> {
        let users = self.user_repository.list().await?;
        let posts = self.post_repository.list().await?;

        let mut by_owner: HashMap<i64, Vec<Post>> = HashMap::new();
        for post in posts {
            if let Some(owner_id) = post.owner_id() {
                by_owner.entry(owner_id).or_default().push(post);
            }
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let posts = by_owner.remove(&user.id).unwrap_or_default();
                UserWithPosts { user, posts }
            })
            .collect())
    }
}
