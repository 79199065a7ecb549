//! Read-only query operations over the catalog snapshot.

use thiserror::Error;

use super::{Book, Catalog};

/// Upper bound for the top-rated query limit.
pub const MAX_TOP_RATED_LIMIT: usize = 100;

/// Errors for catalog queries.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Book {0} not found")]
    NotFound(u32),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Catalog {
    /// Look up a single record, failing with `NotFound` for unknown ids.
    pub fn get(&self, id: u32) -> Result<&Book, QueryError> {
        self.by_id(id).ok_or(QueryError::NotFound(id))
    }

    /// Case-insensitive substring search over title and/or category.
    ///
    /// Absent filters match everything; when both are present they are
    /// ANDed. Results keep load order. Records without a category never
    /// match a category filter.
    pub fn search(&self, title: Option<&str>, category: Option<&str>) -> Vec<Book> {
        let title = title.map(str::to_lowercase);
        let category = category.map(str::to_lowercase);

        self.all()
            .iter()
            .filter(|book| {
                title
                    .as_deref()
                    .map_or(true, |t| book.title.to_lowercase().contains(t))
                    && category.as_deref().map_or(true, |c| {
                        book.category
                            .as_deref()
                            .map_or(false, |bc| bc.to_lowercase().contains(c))
                    })
            })
            .cloned()
            .collect()
    }

    /// The `limit` highest-rated records, descending. The sort is stable,
    /// so ties keep load order.
    pub fn top_rated(&self, limit: usize) -> Result<Vec<Book>, QueryError> {
        if limit == 0 || limit > MAX_TOP_RATED_LIMIT {
            return Err(QueryError::InvalidArgument(format!(
                "limit must be between 1 and {MAX_TOP_RATED_LIMIT}"
            )));
        }

        let mut books: Vec<&Book> = self.all().iter().collect();
        // Ratings are coerced at load time and never NaN
        books.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(books.into_iter().take(limit).cloned().collect())
    }

    /// Records priced within `[min, max]`, inclusive on both bounds, in
    /// load order. An empty result is not an error.
    pub fn price_range(&self, min: f64, max: f64) -> Result<Vec<Book>, QueryError> {
        if min < 0.0 || max < 0.0 {
            return Err(QueryError::InvalidArgument(
                "price bounds must be non-negative".to_string(),
            ));
        }

        Ok(self
            .all()
            .iter()
            .filter(|book| book.price >= min && book.price <= max)
            .cloned()
            .collect())
    }

    /// Distinct non-empty categories, ascending lexicographic order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .all()
            .iter()
            .filter_map(|book| book.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}
