use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::RequireAdmin;
use super::{ApiError, ApiResponse, AppJson, AppState, MessageResponse};
use crate::models::sweet::{NewSweet, Sweet, SweetFilter, SweetPatch};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct CreateSweetRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
}

#[derive(Deserialize)]
pub struct UpdateSweetRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /sweets
pub async fn list_sweets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Sweet>>>, ApiError> {
    let sweets = state.inventory().list().await?;
    Ok(Json(ApiResponse::success(sweets)))
}

/// GET /sweets/search?name&category&minPrice&maxPrice
pub async fn search_sweets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Sweet>>>, ApiError> {
    let filter = SweetFilter {
        name: query.name,
        category: query.category,
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let sweets = state.inventory().search(&filter).await?;
    Ok(Json(ApiResponse::success(sweets)))
}

/// GET /sweets/{id}
pub async fn get_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Sweet>>, ApiError> {
    let sweet = state.inventory().get(&id).await?;
    Ok(Json(ApiResponse::success(sweet)))
}

/// POST /sweets
pub async fn create_sweet(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<CreateSweetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sweet = state
        .inventory()
        .create(NewSweet {
            name: payload.name,
            category: payload.category,
            price: payload.price,
            quantity: payload.quantity,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::<Sweet>::success(sweet)),
    ))
}

/// PUT /sweets/{id}
pub async fn update_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateSweetRequest>,
) -> Result<Json<ApiResponse<Sweet>>, ApiError> {
    let patch = SweetPatch {
        name: payload.name,
        category: payload.category,
        price: payload.price,
        quantity: payload.quantity,
    };

    let sweet = state.inventory().update(&id, patch).await?;
    Ok(Json(ApiResponse::success(sweet)))
}

/// DELETE /sweets/{id} (admin only)
pub async fn delete_sweet(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_claims): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.inventory().delete(&id).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Sweet deleted successfully".to_string(),
    })))
}

/// POST /sweets/{id}/purchase
pub async fn purchase_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<QuantityRequest>,
) -> Result<Json<ApiResponse<Sweet>>, ApiError> {
    let sweet = state.inventory().purchase(&id, payload.quantity).await?;
    Ok(Json(ApiResponse::success(sweet)))
}

/// POST /sweets/{id}/restock (admin only)
pub async fn restock_sweet(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_claims): RequireAdmin,
    Path(id): Path<String>,
    AppJson(payload): AppJson<QuantityRequest>,
) -> Result<Json<ApiResponse<Sweet>>, ApiError> {
    let sweet = state.inventory().restock(&id, payload.quantity).await?;
    Ok(Json(ApiResponse::success(sweet)))
}
