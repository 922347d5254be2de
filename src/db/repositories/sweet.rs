use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, sweets};
use crate::models::sweet::{NewSweet, Sweet, SweetFilter, SweetPatch};

/// Outcome of a guarded stock mutation. The guard and the write are a single
/// UPDATE statement, so concurrent purchases can never drive quantity below
/// zero.
#[derive(Debug)]
pub enum StockAdjustment {
    Adjusted(Sweet),
    NotFound,
    InsufficientStock,
}

pub struct SweetRepository {
    conn: DatabaseConnection,
}

impl SweetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: sweets::Model) -> Sweet {
        Sweet {
            id: model.id,
            name: model.name,
            category: model.category,
            price: model.price,
            quantity: model.quantity,
            created_at: model.created_at,
        }
    }

    pub async fn insert(&self, new: &NewSweet) -> Result<Sweet> {
        let active = sweets::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(new.name.clone()),
            category: Set(new.category.clone()),
            price: Set(new.price),
            quantity: Set(new.quantity),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert sweet")?;

        Ok(Self::map_model(model))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Sweet>> {
        let sweet = Sweets::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query sweet by ID")?;

        Ok(sweet.map(Self::map_model))
    }

    /// All sweets, newest first
    pub async fn list(&self) -> Result<Vec<Sweet>> {
        let rows = Sweets::find()
            .order_by_desc(sweets::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list sweets")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Filtered search, newest first. Name/category match case-insensitively
    /// on substrings; price bounds are inclusive.
    pub async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>> {
        let mut query = Sweets::find();

        if let Some(name) = &filter.name {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(sweets::Column::Name)))
                    .like(format!("%{}%", name.to_lowercase())),
            );
        }

        if let Some(category) = &filter.category {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(sweets::Column::Category)))
                    .like(format!("%{}%", category.to_lowercase())),
            );
        }

        if let Some(min_price) = filter.min_price {
            query = query.filter(sweets::Column::Price.gte(min_price));
        }

        if let Some(max_price) = filter.max_price {
            query = query.filter(sweets::Column::Price.lte(max_price));
        }

        let rows = query
            .order_by_desc(sweets::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to search sweets")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Apply a partial update. Returns `None` when the sweet does not exist.
    pub async fn update(&self, id: &str, patch: &SweetPatch) -> Result<Option<Sweet>> {
        let Some(existing) = Sweets::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query sweet for update")?
        else {
            return Ok(None);
        };

        let mut active: sweets::ActiveModel = existing.into();

        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(category) = &patch.category {
            active.category = Set(category.clone());
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(quantity) = patch.quantity {
            active.quantity = Set(quantity);
        }

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update sweet")?;

        Ok(Some(Self::map_model(model)))
    }

    /// Returns whether a row was deleted
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Sweets::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete sweet")?;

        Ok(result.rows_affected > 0)
    }

    /// Decrement quantity by `amount` only if enough stock remains.
    ///
    /// `UPDATE sweets SET quantity = quantity - ? WHERE id = ? AND
    /// quantity >= ?` — the check and the decrement are indivisible, so two
    /// concurrent purchases cannot both pass the guard against the same
    /// stock.
    pub async fn purchase(&self, id: &str, amount: i64) -> Result<StockAdjustment> {
        let result = Sweets::update_many()
            .col_expr(
                sweets::Column::Quantity,
                Expr::col(sweets::Column::Quantity).sub(amount),
            )
            .filter(sweets::Column::Id.eq(id))
            .filter(sweets::Column::Quantity.gte(amount))
            .exec(&self.conn)
            .await
            .context("Failed to apply purchase")?;

        if result.rows_affected == 0 {
            // Guard rejected: the row is missing or the stock is short
            return Ok(match self.get(id).await? {
                Some(_) => StockAdjustment::InsufficientStock,
                None => StockAdjustment::NotFound,
            });
        }

        let updated = self
            .get(id)
            .await?
            .context("Sweet vanished after purchase update")?;

        Ok(StockAdjustment::Adjusted(updated))
    }

    /// Increment quantity by `amount`
    pub async fn restock(&self, id: &str, amount: i64) -> Result<StockAdjustment> {
        let result = Sweets::update_many()
            .col_expr(
                sweets::Column::Quantity,
                Expr::col(sweets::Column::Quantity).add(amount),
            )
            .filter(sweets::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to apply restock")?;

        if result.rows_affected == 0 {
            return Ok(StockAdjustment::NotFound);
        }

        let updated = self
            .get(id)
            .await?
            .context("Sweet vanished after restock update")?;

        Ok(StockAdjustment::Adjusted(updated))
    }
}
