use sea_orm_migration::prelude::*;

mod m20260601_create_users;
mod m20260601_create_sweets;
mod m20260615_add_sweets_created_idx;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_create_users::Migration),
            Box::new(m20260601_create_sweets::Migration),
            Box::new(m20260615_add_sweets_created_idx::Migration),
        ]
    }
}
