//! Posts, users and the statistics computed over them.
//!
//! Nothing here knows about HTTP, SQL or Redis. Storage is reached only
//! through the traits in [`repositories`], and [`aggregates`] is pure.

pub mod aggregates;
pub mod entities;
pub mod repositories;
