//! Handler for the login endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::login::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Response
///
/// ```json
/// { "token": "eyJhbGciOi...", "username": "mluukkai", "name": "Matti Luukkainen" }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized if the username is unknown or the password is wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;

    let login = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(login.into()))
}
