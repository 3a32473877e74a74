//! Admin listing of users.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use super::auth;
use super::routes::AppState;
use super::types::AdminUsersResponse;

/// GET /api/admin/users — distinct owners with their task counts.
///
/// Requires a session token whose email matches the configured admin email.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AdminUsersResponse>, (StatusCode, String)> {
    let admin_email = state.config.admin_email.as_deref().ok_or((
        StatusCode::FORBIDDEN,
        "Admin access is not configured".to_string(),
    ))?;

    let email = auth::bearer_email(&headers, &state.config.jwt_secret).ok_or((
        StatusCode::UNAUTHORIZED,
        "Missing or invalid session token".to_string(),
    ))?;

    if email != admin_email {
        return Err((StatusCode::FORBIDDEN, "Admin access required".to_string()));
    }

    let users = state
        .store
        .owners()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(AdminUsersResponse { users }))
}
