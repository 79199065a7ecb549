//! Book query handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use libris_core::Book;

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopRatedParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct PriceRangeParams {
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max_price")]
    pub max: f64,
}

fn default_max_price() -> f64 {
    10_000.0
}

/// GET /api/v1/books
///
/// All records in load order.
pub async fn list_books(State(state): State<Arc<AppState>>) -> Json<Vec<Book>> {
    Json(state.catalog().all().to_vec())
}

/// GET /api/v1/books/{id}
///
/// One record, or 404 for unknown ids.
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Book>, ApiError> {
    let book = state.catalog().get(id)?;
    Ok(Json(book.clone()))
}

/// GET /api/v1/books/search?title=&category=
///
/// Case-insensitive substring search; filters are ANDed when both present.
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Book>> {
    Json(
        state
            .catalog()
            .search(params.title.as_deref(), params.category.as_deref()),
    )
}

/// GET /api/v1/books/top-rated?limit=10
pub async fn top_rated(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopRatedParams>,
) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.catalog().top_rated(params.limit)?))
}

/// GET /api/v1/books/price-range?min=0&max=10000
///
/// Inclusive on both bounds.
pub async fn price_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PriceRangeParams>,
) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.catalog().price_range(params.min, params.max)?))
}

/// GET /api/v1/categories
///
/// Distinct non-empty categories, sorted ascending.
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.catalog().categories())
}
