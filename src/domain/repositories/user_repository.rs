//! Storage of user accounts.

use async_trait::async_trait;

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;

/// User account storage, backed by
/// [`PgUserRepository`](crate::infrastructure::persistence::PgUserRepository)
/// or [`InMemoryStore`](crate::infrastructure::persistence::InMemoryStore).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`AppError::Conflict`] when the username is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Exact, case-sensitive match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;
}
