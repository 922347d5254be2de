use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod error;
mod observability;
mod sweets;
mod types;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn inventory(&self) -> &Arc<dyn crate::services::InventoryService> {
        &self.shared.inventory_service
    }

    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn crate::services::CredentialService> {
        &self.shared.credential_service
    }
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// GET /
/// Liveness probe; requires no authentication
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(health))
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // delete_sweet and restock_sweet additionally require the admin role,
    // enforced by the RequireAdmin extractor
    Router::new()
        .route("/sweets", get(sweets::list_sweets))
        .route("/sweets", post(sweets::create_sweet))
        .route("/sweets/search", get(sweets::search_sweets))
        .route("/sweets/{id}", get(sweets::get_sweet))
        .route("/sweets/{id}", put(sweets::update_sweet))
        .route("/sweets/{id}", delete(sweets::delete_sweet))
        .route("/sweets/{id}/purchase", post(sweets::purchase_sweet))
        .route("/sweets/{id}/restock", post(sweets::restock_sweet))
        .route("/system/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
