//! Types for the book catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single book listing from the scraped dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Dense 0..N-1 id assigned in load order, stable for the process lifetime.
    pub id: u32,
    /// Book title.
    pub title: String,
    /// Price, non-negative. Bad input is coerced to 0 at load time.
    pub price: f64,
    /// Average rating in [0, 5]. Bad input is coerced to 0 at load time.
    pub rating: f64,
    /// Whether the book is currently available.
    pub in_stock: bool,
    /// Units in stock.
    pub stock_count: u32,
    /// Category, absent for some records. Absent categories are excluded
    /// from category listings and per-category stats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Cover image URL.
    pub image_url: String,
}

/// Errors for catalog loading. A failed load is fatal to startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Malformed catalog source: {0}")]
    Malformed(String),
}
