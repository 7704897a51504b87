//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, PostService, StatsService, UserService};
use crate::domain::repositories::{PostRepository, UserRepository};
use crate::infrastructure::cache::{CacheService, NullCache};
use crate::infrastructure::persistence::InMemoryStore;

/// Services behind trait objects so one router serves any storage backend.
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PostService<dyn PostRepository>>,
    pub user_service: Arc<UserService<dyn UserRepository, dyn PostRepository>>,
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub stats_service: Arc<StatsService<dyn PostRepository>>,
    pub cache: Arc<dyn CacheService>,
}

/// Token signing settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
}

impl AppState {
    /// Wires every service on top of the given repositories and cache.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheService>,
        auth: AuthSettings,
    ) -> Self {
        Self {
            post_service: Arc::new(PostService::new(posts.clone())),
            user_service: Arc::new(UserService::new(users.clone(), posts.clone())),
            auth_service: Arc::new(AuthService::new(
                users,
                auth.jwt_secret,
                auth.token_ttl_seconds,
            )),
            stats_service: Arc::new(StatsService::new(posts, cache.clone())),
            cache,
        }
    }

    /// State over a fresh [`InMemoryStore`] with caching disabled.
    pub fn in_memory(auth: AuthSettings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store, Arc::new(NullCache::new()), auth)
    }
}
