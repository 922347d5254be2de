use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Bootstrap admin credentials; `sweetshop create-admin` replaces these in
/// real deployments.
const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";
const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@example.com";
const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin123";

/// Hash the bootstrap password using Argon2id
fn hash_bootstrap_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(BOOTSTRAP_ADMIN_PASSWORD.as_bytes(), &salt)
        .expect("Failed to hash bootstrap admin password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed the bootstrap admin so a fresh database is usable immediately
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_bootstrap_password();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                crate::entities::users::Column::Username,
                crate::entities::users::Column::Email,
                crate::entities::users::Column::PasswordHash,
                crate::entities::users::Column::Role,
                crate::entities::users::Column::CreatedAt,
            ])
            .values_panic([
                BOOTSTRAP_ADMIN_USERNAME.into(),
                BOOTSTRAP_ADMIN_EMAIL.into(),
                password_hash.into(),
                "admin".into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
