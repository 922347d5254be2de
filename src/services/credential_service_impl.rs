//! `SeaORM` implementation of the `CredentialService` trait.

use async_trait::async_trait;

use crate::config::{AuthConfig, SecurityConfig};
use crate::db::{Role, Store};
use crate::services::credential_service::{AuthError, AuthSession, CredentialService, UserInfo};
use crate::services::token::{self, Claims};

pub struct SeaOrmCredentialService {
    store: Store,
    auth: AuthConfig,
    security: SecurityConfig,
}

impl SeaOrmCredentialService {
    #[must_use]
    pub const fn new(store: Store, auth: AuthConfig, security: SecurityConfig) -> Self {
        Self {
            store,
            auth,
            security,
        }
    }

    fn issue_session(&self, user: crate::db::User) -> Result<AuthSession, AuthError> {
        let token = token::issue(&self.auth.jwt_secret, self.auth.token_ttl_hours, &user)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(AuthSession {
            token,
            user: UserInfo::from(user),
        })
    }
}

#[async_trait]
impl CredentialService for SeaOrmCredentialService {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let username = username.trim();
        let email = email.trim();

        if username.len() < 3 {
            return Err(AuthError::Validation(
                "Username must be at least 3 characters".to_string(),
            ));
        }

        if !is_valid_email(email) {
            return Err(AuthError::Validation("Valid email required".to_string()));
        }

        if password.len() < 6 {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if self.store.user_exists(username, email).await? {
            return Err(AuthError::Conflict);
        }

        let user = self
            .store
            .create_user(username, email, password, Role::User, &self.security)
            .await?;

        tracing::info!("Registered user: {username}");

        self.issue_session(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = email.trim();

        if !is_valid_email(email) {
            return Err(AuthError::Validation("Valid email required".to_string()));
        }

        if password.is_empty() {
            return Err(AuthError::Validation("Password required".to_string()));
        }

        // Same error for unknown email and wrong password
        let user = self
            .store
            .verify_user_credentials(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.issue_session(user)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        token::verify(&self.auth.jwt_secret, token).map_err(|_| AuthError::InvalidToken)
    }
}

/// Well-formedness check for emails: one `@`, non-empty local part, a dotted
/// domain, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty() && !tld.is_empty()
}
