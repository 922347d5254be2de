use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sweets")]
pub struct Model {
    /// UUID v4, assigned on create and never reassigned
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub category: String,

    pub price: f64,

    /// Never negative; purchase/restock mutate this through a guarded UPDATE
    pub quantity: i64,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
