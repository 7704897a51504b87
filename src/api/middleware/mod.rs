//! Tower layers wrapped around the API routes.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
