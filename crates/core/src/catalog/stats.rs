//! Derived catalog aggregates.
//!
//! Aggregates are recomputed on every call, never cached or persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Book, Catalog};

/// Summary statistics over the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub count: usize,
    pub mean_price: f64,
    pub mean_rating: f64,
    pub total_stock: u64,
}

/// Summary statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    pub mean_price: f64,
    pub mean_rating: f64,
    pub total_stock: u64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn summarize<'a, I: Iterator<Item = &'a Book>>(books: I) -> (usize, f64, f64, u64) {
    let mut count = 0usize;
    let mut price_sum = 0.0;
    let mut rating_sum = 0.0;
    let mut stock_sum = 0u64;
    for book in books {
        count += 1;
        price_sum += book.price;
        rating_sum += book.rating;
        stock_sum += u64::from(book.stock_count);
    }
    if count == 0 {
        return (0, 0.0, 0.0, 0);
    }
    (
        count,
        round2(price_sum / count as f64),
        round2(rating_sum / count as f64),
        stock_sum,
    )
}

impl Catalog {
    /// Global aggregate. All zeroes on an empty catalog, never an error.
    pub fn overview(&self) -> Overview {
        let (count, mean_price, mean_rating, total_stock) = summarize(self.all().iter());
        Overview {
            count,
            mean_price,
            mean_rating,
            total_stock,
        }
    }

    /// Per-category aggregates, sorted by category ascending. Only
    /// categories present in the data appear; uncategorized records are
    /// excluded.
    pub fn stats_by_category(&self) -> Vec<CategoryStats> {
        let mut groups: BTreeMap<&str, Vec<&Book>> = BTreeMap::new();
        for book in self.all() {
            if let Some(category) = book.category.as_deref() {
                groups.entry(category).or_default().push(book);
            }
        }

        groups
            .into_iter()
            .map(|(category, books)| {
                let (count, mean_price, mean_rating, total_stock) =
                    summarize(books.into_iter());
                CategoryStats {
                    category: category.to_string(),
                    count,
                    mean_price,
                    mean_rating,
                    total_stock,
                }
            })
            .collect()
    }
}
