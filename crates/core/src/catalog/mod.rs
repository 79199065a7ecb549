//! In-memory book catalog.
//!
//! The catalog is built once at startup from the scraper's CSV output and is
//! immutable for the life of the process. All query and aggregation
//! operations are pure reads over the loaded snapshot, so the catalog can be
//! shared freely across request handlers without locking.

mod loader;
mod query;
mod stats;
mod types;

pub use loader::{load_catalog, read_catalog};
pub use query::{QueryError, MAX_TOP_RATED_LIMIT};
pub use stats::{CategoryStats, Overview};
pub use types::*;

/// Immutable snapshot of the book catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog from records, assigning each book its position as id.
    pub fn new(mut books: Vec<Book>) -> Self {
        for (idx, book) in books.iter_mut().enumerate() {
            book.id = idx as u32;
        }
        Self { books }
    }

    /// All records in load order.
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    /// Look up a record by id. Ids are dense, so this is a direct index.
    pub fn by_id(&self, id: u32) -> Option<&Book> {
        self.books.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
