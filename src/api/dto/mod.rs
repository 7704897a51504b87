//! Wire shapes for request bodies and JSON responses.

pub mod health;
pub mod login;
pub mod post;
pub mod stats;
pub mod user;
