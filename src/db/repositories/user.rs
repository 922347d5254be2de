use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;

/// Role attached to every user. Admins may additionally delete and restock
/// sweets; everything else is open to any authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Unknown values in the database fall back to the least-privileged role.
    #[must_use]
    pub fn from_db(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

/// User data returned from the repository (without the password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: Role::from_db(&model.role),
            created_at: model.created_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create a user, hashing the password with the configured Argon2 params.
    /// Note: hashing runs on `spawn_blocking` because Argon2 is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        security: &SecurityConfig,
    ) -> Result<User> {
        let password = password.to_string();
        let security = security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(User::from(model))
    }

    /// Whether a user already exists with this username or email
    pub async fn exists_with_username_or_email(&self, username: &str, email: &str) -> Result<bool> {
        let found = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username))
                    .add(users::Column::Email.eq(email)),
            )
            .one(&self.conn)
            .await
            .context("Failed to query user by username/email")?;

        Ok(found.is_some())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Verify credentials and return the matching user.
    ///
    /// Returns `None` for an unknown email and for a wrong password alike, so
    /// callers cannot tell which check failed.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user for credential verification")?;

        let Some(user) = user else {
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        // CPU-intensive verification runs in a blocking task
        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(user)))
    }
}

/// Hash a password using Argon2id with the configured params
pub fn hash_password(password: &str, security: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        security.argon2_memory_cost_kib,
        security.argon2_time_cost,
        security.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
