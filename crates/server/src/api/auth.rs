//! Login and token refresh handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::middleware::bearer_token;
use crate::metrics::AUTH_FAILURES_TOTAL;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokenResponse {
    fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue a bearer token. The response does not
/// distinguish unknown user from wrong password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .authenticator()
        .login(&request.username, &request.password)
        .map_err(|e| {
            AUTH_FAILURES_TOTAL
                .with_label_values(&["invalid_credentials"])
                .inc();
            ApiError::from(e)
        })?;

    Ok(Json(TokenResponse::new(
        token,
        state.authenticator().token_ttl_secs(),
    )))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a currently valid bearer token for a fresh one, same subject.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    let refreshed = state.authenticator().refresh(token)?;

    Ok(Json(TokenResponse::new(
        refreshed,
        state.authenticator().token_ttl_secs(),
    )))
}
