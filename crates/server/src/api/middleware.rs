//! Authentication and metrics middleware for API routes.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use libris_core::{AuthError, Identity};

use super::error::ApiError;
use crate::metrics::{
    normalize_path, AUTH_FAILURES_TOTAL, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL,
    HTTP_REQUEST_DURATION,
};
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
}

/// Metrics middleware that tracks HTTP request duration and counts.
///
/// This middleware records:
/// - Request duration (histogram)
/// - Request count (counter)
/// - Requests in flight (gauge)
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    HTTP_REQUESTS_IN_FLIGHT.inc();

    let response = next.run(request).await;

    HTTP_REQUESTS_IN_FLIGHT.dec();

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path, &status])
        .observe(duration);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}

/// Authentication middleware guarding admin routes.
///
/// Validates the bearer token, resolves it to a stored user and inserts
/// the resulting `Identity` into request extensions. Requests without a
/// valid token never reach the handler.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()) else {
        AUTH_FAILURES_TOTAL
            .with_label_values(&["missing_token"])
            .inc();
        return Err(ApiError::Unauthorized);
    };

    match state.authenticator().authenticate(token) {
        Ok(identity) => {
            let mut request = request;
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(AuthError::Unauthorized) => {
            AUTH_FAILURES_TOTAL
                .with_label_values(&["invalid_token"])
                .inc();
            Err(ApiError::Unauthorized)
        }
        Err(e) => {
            AUTH_FAILURES_TOTAL
                .with_label_values(&["internal_error"])
                .inc();
            Err(ApiError::Internal(e.to_string()))
        }
    }
}

/// Extractor for the authenticated identity.
///
/// Pulls the `Identity` the auth middleware stored in request extensions;
/// rejects with 401 if the route was not behind the middleware.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or(ApiError::Unauthorized);
        std::future::ready(result)
    }
}
