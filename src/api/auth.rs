use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppJson, AppState};
use crate::db::Role;
use crate::services::{AuthSession, Claims};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Authentication middleware: requires a valid `Authorization: Bearer` token
/// and attaches the decoded [`Claims`] to the request for downstream use.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer_token(&headers) else {
        return Err(ApiError::Unauthorized(
            "Authentication required".to_string(),
        ));
    };

    let claims = state
        .credentials()
        .verify_token(&token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    tracing::Span::current().record("user_id", &claims.sub);

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

/// Extractor gating admin-only operations. Runs after `auth_middleware` has
/// attached the claims; rejects with 403 when the caller's role is not admin.
pub struct RequireAdmin(pub Claims);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        if claims.role != Role::Admin {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }

        Ok(Self(claims))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Create an account with role `user`, returns a session token on success
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .credentials()
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::<AuthSession>::success(session)),
    ))
}

/// POST /auth/login
/// Verify credentials, returns a fresh session token on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthSession>>, ApiError> {
    let session = state
        .credentials()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(session)))
}
