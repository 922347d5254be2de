use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing and search both sort newest-first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sweets_created_at")
                    .table(Sweets::Table)
                    .col(Sweets::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sweets_created_at")
                    .table(Sweets::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Sweets {
    Table,
    CreatedAt,
}
