use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use libris_core::SanitizedConfig;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub mensagem: String,
    pub books_loaded: usize,
    pub categories: Vec<String>,
    pub category_count: usize,
    pub checked_at: DateTime<Utc>,
    pub latency_ms: f64,
}

/// GET /api/v1/health
///
/// Detailed service status: catalog size, available categories and the
/// time it took to compute them.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let start = Instant::now();
    let catalog = state.catalog();
    let books_loaded = catalog.len();
    let categories = catalog.categories();
    let latency_ms = (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0;

    Json(HealthResponse {
        status: "OK".to_string(),
        mensagem: "Book catalog API is up and serving".to_string(),
        books_loaded,
        category_count: categories.len(),
        categories,
        checked_at: Utc::now(),
        latency_ms,
    })
}

/// GET /api/v1/config
///
/// Running configuration with secrets redacted.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}
