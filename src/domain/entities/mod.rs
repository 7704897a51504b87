//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs live next to them:
//!
//! - [`Post`] / [`NewPost`] / [`PostPatch`] - shared article references
//! - [`User`] / [`NewUser`] / [`Registration`] - accounts owning posts

pub mod post;
pub mod user;

pub use post::{MAX_LIKES, NewPost, Post, PostOwner, PostPatch, likes_in_range};
pub use user::{NewUser, Registration, User};
