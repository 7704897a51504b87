//! DTOs for the login endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::LoginToken;

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login: a bearer token plus display fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: String,
}

impl From<LoginToken> for LoginResponse {
    fn from(login: LoginToken) -> Self {
        Self {
            token: login.token,
            username: login.username,
            name: login.name,
        }
    }
}
