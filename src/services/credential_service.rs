//! Domain service for registration, login, and token validation.

use serde::Serialize;
use thiserror::Error;

use crate::db::Role;
use crate::services::token::Claims;

/// Errors specific to credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    Conflict,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Public identity DTO for responses; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<crate::db::User> for UserInfo {
    fn from(user: crate::db::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// A freshly issued session: bearer token plus the identity it names.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserInfo,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait CredentialService: Send + Sync {
    /// Registers a new user with role `user` and issues a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for malformed input and
    /// [`AuthError::Conflict`] when the username or email is taken.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Verifies credentials and issues a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email and a
    /// wrong password alike.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Validates a bearer token and returns its claims.
    fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;
}
