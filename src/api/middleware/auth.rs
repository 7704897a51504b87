//! Login token check for the mutating post routes.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Resolves the caller from `Authorization: bearer <token>`.
///
/// Any capitalisation of the scheme is accepted. The token must carry a valid
/// signature, be unexpired and name a user that still exists. On success the
/// caller is stored as an [`AuthenticatedUser`](crate::application::services::AuthenticatedUser)
/// request extension for the handler to pick up.
///
/// Every failure is a 401 carrying `WWW-Authenticate: Bearer`.
///
/// Mounted with `route_layer` so unmatched paths still 404:
///
/// ```rust,ignore
/// Router::new()
///     .route("/posts", post(create_post_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        AppError::unauthorized(
            "token missing or invalid",
            json!({"reason": "Authorization header is missing or invalid"}),
        )
    })?;

    let caller = st.auth_service.authenticate(&token).await?;
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}
