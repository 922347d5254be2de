//! `SeaORM` implementation of the `InventoryService` trait.

use async_trait::async_trait;

use crate::db::{StockAdjustment, Store};
use crate::models::sweet::{NewSweet, Sweet, SweetFilter, SweetPatch};
use crate::services::inventory_service::{InventoryError, InventoryService};

pub struct SeaOrmInventoryService {
    store: Store,
}

impl SeaOrmInventoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl InventoryService for SeaOrmInventoryService {
    async fn list(&self) -> Result<Vec<Sweet>, InventoryError> {
        Ok(self.store.list_sweets().await?)
    }

    async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>, InventoryError> {
        Ok(self.store.search_sweets(filter).await?)
    }

    async fn get(&self, id: &str) -> Result<Sweet, InventoryError> {
        self.store
            .get_sweet(id)
            .await?
            .ok_or(InventoryError::NotFound)
    }

    async fn create(&self, new: NewSweet) -> Result<Sweet, InventoryError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(InventoryError::Validation("Name is required".to_string()));
        }

        let category = new.category.trim();
        if category.is_empty() {
            return Err(InventoryError::Validation(
                "Category is required".to_string(),
            ));
        }

        validate_price(new.price)?;
        validate_stock_quantity(new.quantity)?;

        let sweet = self
            .store
            .insert_sweet(&NewSweet {
                name: name.to_string(),
                category: category.to_string(),
                price: new.price,
                quantity: new.quantity,
            })
            .await?;

        tracing::info!("Created sweet: {} ({})", sweet.name, sweet.id);

        Ok(sweet)
    }

    async fn update(&self, id: &str, mut patch: SweetPatch) -> Result<Sweet, InventoryError> {
        if patch.is_empty() {
            return Err(InventoryError::Validation(
                "No fields to update".to_string(),
            ));
        }

        if let Some(name) = patch.name.take() {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(InventoryError::Validation(
                    "Name cannot be empty".to_string(),
                ));
            }
            patch.name = Some(name);
        }

        if let Some(category) = patch.category.take() {
            let category = category.trim().to_string();
            if category.is_empty() {
                return Err(InventoryError::Validation(
                    "Category cannot be empty".to_string(),
                ));
            }
            patch.category = Some(category);
        }

        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        if let Some(quantity) = patch.quantity {
            validate_stock_quantity(quantity)?;
        }

        self.store
            .update_sweet(id, &patch)
            .await?
            .ok_or(InventoryError::NotFound)
    }

    async fn delete(&self, id: &str) -> Result<(), InventoryError> {
        if self.store.delete_sweet(id).await? {
            tracing::info!("Deleted sweet: {id}");
            Ok(())
        } else {
            Err(InventoryError::NotFound)
        }
    }

    async fn purchase(&self, id: &str, quantity: i64) -> Result<Sweet, InventoryError> {
        validate_adjustment_quantity(quantity)?;

        match self.store.purchase_sweet(id, quantity).await? {
            StockAdjustment::Adjusted(sweet) => {
                tracing::info!("Purchased {quantity} of sweet {id}");
                Ok(sweet)
            }
            StockAdjustment::NotFound => Err(InventoryError::NotFound),
            StockAdjustment::InsufficientStock => Err(InventoryError::InsufficientStock),
        }
    }

    async fn restock(&self, id: &str, quantity: i64) -> Result<Sweet, InventoryError> {
        validate_adjustment_quantity(quantity)?;

        match self.store.restock_sweet(id, quantity).await? {
            StockAdjustment::Adjusted(sweet) => {
                tracing::info!("Restocked {quantity} of sweet {id}");
                Ok(sweet)
            }
            StockAdjustment::NotFound => Err(InventoryError::NotFound),
            StockAdjustment::InsufficientStock => Err(InventoryError::InsufficientStock),
        }
    }
}

fn validate_price(price: f64) -> Result<(), InventoryError> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::Validation(
            "Price must be a positive number".to_string(),
        ));
    }
    Ok(())
}

/// Quantities held in stock may be zero; adjustments may not.
fn validate_stock_quantity(quantity: i64) -> Result<(), InventoryError> {
    if quantity < 0 {
        return Err(InventoryError::Validation(
            "Quantity must be a non-negative integer".to_string(),
        ));
    }
    Ok(())
}

fn validate_adjustment_quantity(quantity: i64) -> Result<(), InventoryError> {
    if quantity < 1 {
        return Err(InventoryError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}
