pub mod credential_service;
pub use credential_service::{AuthError, AuthSession, CredentialService, UserInfo};

pub mod credential_service_impl;
pub use credential_service_impl::SeaOrmCredentialService;

pub mod inventory_service;
pub use inventory_service::{InventoryError, InventoryService};

pub mod inventory_service_impl;
pub use inventory_service_impl::SeaOrmInventoryService;

pub mod token;
pub use token::Claims;
