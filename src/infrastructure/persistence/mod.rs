//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgPostRepository`] - PostgreSQL post storage (SQLx)
//! - [`PgUserRepository`] - PostgreSQL user storage (SQLx)
//! - [`InMemoryStore`] - process-local store implementing both traits, used
//!   for `STORAGE_BACKEND=memory` and HTTP tests

pub mod memory_store;
pub mod pg_post_repository;
pub mod pg_user_repository;

pub use memory_store::InMemoryStore;
pub use pg_post_repository::PgPostRepository;
pub use pg_user_repository::PgUserRepository;

