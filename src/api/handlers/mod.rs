//! Axum handlers, one module per resource.

pub mod health;
pub mod login;
pub mod posts;
pub mod stats;
pub mod users;

pub use health::health_handler;
pub use login::login_handler;
pub use posts::{
    create_post_handler, delete_post_handler, get_post_handler, list_posts_handler,
    update_post_handler,
};
pub use stats::stats_handler;
pub use users::{create_user_handler, list_users_handler};
