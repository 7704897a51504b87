//! `GET /health`

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse, Overall};
use crate::state::AppState;

/// Probes storage and cache.
///
/// Answers 200 when both respond and 503 otherwise; the body has the same
/// shape either way:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Connected, 6 posts" },
///     "cache": { "status": "ok", "message": "Reachable" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = match state.post_service.count_posts().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} posts")),
        Err(e) => {
            tracing::warn!(error = %e, "Storage health probe failed");
            CheckStatus::error(e.to_string())
        }
    };

    let cache = if state.cache.health_check().await {
        CheckStatus::ok("Reachable")
    } else {
        CheckStatus::error("Unreachable")
    };

    let response = HealthResponse::from_checks(HealthChecks { storage, cache });
    let code = match response.status {
        Overall::Healthy => StatusCode::OK,
        Overall::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(response))
}
