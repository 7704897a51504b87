//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules, and
//! give HTTP handlers and the admin CLI one API to call.
//!
//! # Available Services
//!
//! - [`services::post_service::PostService`] - Post CRUD and ownership checks
//! - [`services::user_service::UserService`] - Registration and user listing
//! - [`services::auth_service::AuthService`] - Login and bearer tokens
//! - [`services::stats_service::StatsService`] - Cached post list statistics

pub mod services;
