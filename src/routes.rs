//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health` - Health check: storage and cache (public)
//! - `/api/*`       - REST API (mutations require a Bearer token)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter for login and registration
//! - **Authentication** - Bearer token on post mutations
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = Router::new()
        .merge(rate_limit::limit(api::routes::public_routes(), behind_proxy))
        .merge(rate_limit::limit_strict(
            api::routes::credential_routes(),
            behind_proxy,
        ))
        .merge(rate_limit::limit(
            api::routes::protected_routes(&state),
            behind_proxy,
        ));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Same routes as [`app_router`] without rate limiting or path normalization.
///
/// Used where no peer address is available, such as in-process tests.
pub fn unlimited_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::router(&state))
        .with_state(state)
        .layer(tracing::layer())
}
