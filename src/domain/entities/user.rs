//! User entity and registration input.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use validator::Validate;

/// Allowed characters for usernames.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid username regex"));

/// A registered user.
///
/// Only the Argon2 hash of the password is kept; the raw password never
/// leaves [`crate::application::services::UserService::register`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for storing a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

/// Registration request as accepted from the API or the admin CLI.
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(length(min = 3, max = 64, message = "username must be at least 3 characters"))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "username may contain letters, digits, '_', '.' and '-'"
    ))]
    pub username: String,

    #[validate(length(max = 128))]
    pub name: String,

    #[validate(length(min = 3, max = 256, message = "password must be at least 3 characters"))]
    pub password: String,
}
