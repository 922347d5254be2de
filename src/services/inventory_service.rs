//! Domain service for the sweets catalog.
//!
//! Owns input validation and the stock invariants (quantity never negative,
//! purchase rejected rather than oversold). Authorization is the Access
//! Gate's job; this service assumes its caller is already allowed to act.

use thiserror::Error;

use crate::models::sweet::{NewSweet, Sweet, SweetFilter, SweetPatch};

/// Errors specific to inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Sweet not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Insufficient quantity in stock")]
    InsufficientStock,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for InventoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for InventoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for the catalog.
#[async_trait::async_trait]
pub trait InventoryService: Send + Sync {
    /// All sweets, newest-created first. An empty catalog is not an error.
    async fn list(&self) -> Result<Vec<Sweet>, InventoryError>;

    /// Sweets matching every supplied predicate, newest first. An empty
    /// result is not an error.
    async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>, InventoryError>;

    /// Single sweet by id. A malformed id is indistinguishable from an
    /// absent one: both are [`InventoryError::NotFound`].
    async fn get(&self, id: &str) -> Result<Sweet, InventoryError>;

    /// Validates and persists a new sweet, assigning id and timestamp.
    async fn create(&self, new: NewSweet) -> Result<Sweet, InventoryError>;

    /// Applies a partial update; unsupplied fields keep their prior values.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] when the patch is empty or a
    /// supplied field violates the create-time constraints.
    async fn update(&self, id: &str, patch: SweetPatch) -> Result<Sweet, InventoryError>;

    /// Permanently removes a sweet.
    async fn delete(&self, id: &str) -> Result<(), InventoryError>;

    /// Atomically decrements stock by `quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InsufficientStock`] (with no state change)
    /// when the sweet holds fewer than `quantity` units.
    async fn purchase(&self, id: &str, quantity: i64) -> Result<Sweet, InventoryError>;

    /// Atomically increments stock by `quantity`.
    async fn restock(&self, id: &str, quantity: i64) -> Result<Sweet, InventoryError>;
}
