//! API route configuration.
//!
//! Routes are grouped by access policy so the top-level router can put a
//! different rate limit on each group.

use crate::api::handlers::{
    create_post_handler, create_user_handler, delete_post_handler, get_post_handler,
    list_posts_handler, list_users_handler, login_handler, stats_handler, update_post_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Read-only endpoints open to everyone.
///
/// # Endpoints
///
/// - `GET /posts`        - List posts
/// - `GET /posts/stats`  - Summary statistics
/// - `GET /posts/{id}`   - One post
/// - `GET /users`        - Users with their posts
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts_handler))
        .route("/posts/stats", get(stats_handler))
        .route("/posts/{id}", get(get_post_handler))
        .route("/users", get(list_users_handler))
}

/// Login and registration.
///
/// # Endpoints
///
/// - `POST /users` - Register a user
/// - `POST /login` - Exchange credentials for a token
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/login", post(login_handler))
}

/// Mutating endpoints, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /posts`      - Create a post
/// - `PUT    /posts/{id}` - Update a post
/// - `DELETE /posts/{id}` - Delete a post (creator only)
pub fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post_handler))
        .route(
            "/posts/{id}",
            axum::routing::put(update_post_handler).delete(delete_post_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
}

/// Every API route without rate limiting, to be nested under `/api`.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(credential_routes())
        .merge(protected_routes(state))
}
