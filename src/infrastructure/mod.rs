//! Storage and cache backends behind the domain traits.

pub mod cache;
pub mod persistence;
