//! Login-by-email session tokens.
//!
//! The UI submits a name and an email; the server answers with a JWT
//! carrying the normalized email. Only the admin listing checks the token;
//! the assistant endpoint stays addressed by the email in its body.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use crate::tasks::normalize_owner;

use super::routes::AppState;
use super::types::{LoginRequest, LoginResponse};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    /// Normalized user email.
    sub: String,
    /// Display name (for auditing).
    #[serde(default)]
    usr: String,
    /// Issued-at unix seconds
    iat: i64,
    /// Expiration unix seconds
    exp: i64,
}

fn issue_jwt(secret: &str, ttl_days: i64, email: &str, name: &str) -> anyhow::Result<(String, i64)> {
    let now = Utc::now();
    let exp = now + Duration::days(ttl_days.max(1));
    let claims = Claims {
        sub: email.to_string(),
        usr: name.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, claims.exp))
}

fn verify_jwt(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// POST /api/auth/login — issue a session token for an email.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let name = req.name.trim();
    let email = normalize_owner(&req.email);
    if name.is_empty() || email.is_empty() || !email.contains('@') {
        return Err((
            StatusCode::BAD_REQUEST,
            "A name and a valid email are required".to_string(),
        ));
    }

    let (token, exp) = issue_jwt(
        &state.config.jwt_secret,
        state.config.session_ttl_days,
        &email,
        name,
    )
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(%email, "session issued");

    Ok(Json(LoginResponse { token, exp, email }))
}

/// Extract the bearer email from request headers, if the token verifies.
pub fn bearer_email(headers: &HeaderMap, secret: &str) -> Option<String> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))?;
    verify_jwt(token, secret).ok().map(|claims| claims.sub)
}
