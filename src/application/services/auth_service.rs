//! Password hashing, login and bearer-token validation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Claims carried by issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity of the caller, attached to requests by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

/// Successful login result.
#[derive(Debug, Clone, Serialize)]
pub struct LoginToken {
    pub token: String,
    pub username: String,
    pub name: String,
}

/// Hashes a raw password with Argon2id and a random salt.
///
/// Returns a PHC-formatted string safe for storage.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Password hashing failed", json!({}))
        })
}

/// Checks a raw password against a stored PHC hash.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the stored hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        tracing::error!(error = %e, "Stored password hash is malformed");
        AppError::internal("Invalid password hash", json!({}))
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => {
            tracing::error!(error = %e, "Password verification failed");
            Err(AppError::internal("Password verification failed", json!({})))
        }
    }
}

/// Service issuing and checking HS256 bearer tokens.
///
/// Tokens embed the user id and expire after `token_ttl_seconds`. A token is
/// only accepted while its user still exists.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    secret: String,
    token_ttl_seconds: i64,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user repository for credential lookups
    /// - `secret` - HMAC key for signing tokens
    /// - `token_ttl_seconds` - lifetime of issued tokens
    pub fn new(repository: Arc<R>, secret: String, token_ttl_seconds: u64) -> Self {
        Self {
            repository,
            secret,
            token_ttl_seconds: i64::try_from(token_ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user does not exist or the
    /// password does not match. The two cases are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginToken, AppError> {
        let user = self.repository.find_by_username(username).await?;

        let user = match user {
            Some(user) if verify_password(password, &user.password_hash)? => user,
            _ => {
                tracing::info!(username, "Login rejected");
                return Err(AppError::unauthorized(
                    "invalid username or password",
                    json!({}),
                ));
            }
        };

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginToken {
            token,
            username: user.username,
            name: user.name,
        })
    }

    /// Signs a token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            iat: now,
            exp: now.saturating_add(self.token_ttl_seconds),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Token generation failed");
            AppError::internal("Token generation failed", json!({}))
        })
    }

    /// Checks signature and expiry of a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, forged or expired tokens.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::unauthorized("token invalid", json!({ "reason": e.to_string() }))
        })
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or its user
    /// no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.verify_token(token)?;

        let user = self
            .repository
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("token invalid", json!({ "reason": "Unknown user" }))
            })?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn test_user(password: &str) -> User {
        User {
            id: 7,
            username: "mluukkai".to_string(),
            name: "Matti Luukkainen".to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("salainen").unwrap();

        assert_ne!(hash, "salainen");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("salainen", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let result = verify_password("salainen", "not-a-hash");
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut mock_repo = MockUserRepository::new();
        let user = test_user("salainen");

        mock_repo
            .expect_find_by_username()
            .withf(|username| username == "mluukkai")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let login = service.login("mluukkai", "salainen").await.unwrap();

        assert_eq!(login.username, "mluukkai");
        assert_eq!(login.name, "Matti Luukkainen");

        let claims = service.verify_token(&login.token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "mluukkai");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let user = test_user("salainen");

        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let result = service.login("mluukkai", "wrong").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let result = service.login("nobody", "salainen").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let issuer = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "secret-a".to_string(),
            3600,
        );
        let verifier = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "secret-b".to_string(),
            3600,
        );

        let token = issuer.issue_token(&test_user("salainen")).unwrap();

        assert!(issuer.verify_token(&token).is_ok());
        assert!(matches!(
            verifier.verify_token(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret(), 3600);

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            username: "mluukkai".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(test_secret().as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify_token(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret(), 3600);
        assert!(service.verify_token("not.a.token").is_err());
    }

    #[tokio::test]
    async fn test_authenticate_requires_existing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);
        let token = service.issue_token(&test_user("salainen")).unwrap();

        let result = service.authenticate(&token).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockUserRepository::new();
        let user = test_user("salainen");
        let stored = user.clone();

        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);
        let token = service.issue_token(&user).unwrap();

        let caller = service.authenticate(&token).await.unwrap();

        assert_eq!(
            caller,
            AuthenticatedUser {
                id: 7,
                username: "mluukkai".to_string(),
            }
        );
    }
}
