use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CredentialService, InventoryService, SeaOrmCredentialService, SeaOrmInventoryService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub inventory_service: Arc<dyn InventoryService>,

    pub credential_service: Arc<dyn CredentialService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let inventory_service: Arc<dyn InventoryService> =
            Arc::new(SeaOrmInventoryService::new(store.clone()));

        let credential_service: Arc<dyn CredentialService> =
            Arc::new(SeaOrmCredentialService::new(
                store.clone(),
                config.auth.clone(),
                config.security.clone(),
            ));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            inventory_service,
            credential_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
