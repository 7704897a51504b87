//! Business logic services for the application layer.

pub mod auth_service;
pub mod post_service;
pub mod stats_service;
pub mod user_service;

pub use auth_service::{AuthService, AuthenticatedUser, Claims, LoginToken};
pub use post_service::{PostInput, PostService};
pub use stats_service::StatsService;
pub use user_service::{UserService, UserWithPosts};
