//! Aggregate statistics handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use libris_core::{CategoryStats, Overview};

use crate::state::AppState;

/// GET /api/v1/stats/overview
///
/// Global aggregate over the whole catalog; all zeroes when empty.
pub async fn overview(State(state): State<Arc<AppState>>) -> Json<Overview> {
    Json(state.catalog().overview())
}

/// GET /api/v1/stats/categories
///
/// Per-category aggregates, sorted by category ascending.
pub async fn by_category(State(state): State<Arc<AppState>>) -> Json<Vec<CategoryStats>> {
    Json(state.catalog().stats_by_category())
}
