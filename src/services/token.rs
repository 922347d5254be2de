//! Session tokens: HS256 JWTs carrying identity and role.
//!
//! Validity is a pure function of token, secret, and clock. There is no
//! server-side revocation; logout is a client-side action.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{Role, User};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Standard JWT subject: the user id
    pub sub: String,

    pub username: String,

    pub email: String,

    /// Embedded so admin checks need no database read
    pub role: Role,

    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,

    /// Standard JWT expiry (Unix timestamp, seconds)
    pub exp: i64,
}

/// Sign a token for `user`, valid for `ttl_hours` from now
pub fn issue(secret: &str, ttl_hours: i64, user: &User) -> Result<String, TokenError> {
    let now = chrono::Utc::now();

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Decode and verify signature + expiry. Every failure collapses into
/// [`TokenError::Invalid`] so callers cannot distinguish why a token was
/// rejected.
pub fn verify(secret: &str, token: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)
}
