//! API error taxonomy with deterministic status code mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use libris_core::{AuthError, QueryError, ScraperError};

/// Error kinds surfaced by API handlers, each with a fixed status code.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown resource id -> 404
    NotFound(String),
    /// Out-of-range query parameter -> 422
    InvalidArgument(String),
    /// Bad login; does not reveal which factor failed -> 401
    InvalidCredentials,
    /// Missing, invalid or expired token -> 401
    Unauthorized,
    /// Authenticated but not allowed -> 403
    Forbidden,
    /// Feature not configured on this deployment -> 503
    Unavailable(String),
    /// Everything else -> 500
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InvalidArgument(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Token missing, invalid or expired".to_string(),
            ),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Admin access required".to_string()),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(id) => ApiError::NotFound(format!("Book {id} not found")),
            QueryError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Unauthorized => ApiError::Unauthorized,
            AuthError::Store(msg) | AuthError::Configuration(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ScraperError> for ApiError {
    fn from(err: ScraperError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
