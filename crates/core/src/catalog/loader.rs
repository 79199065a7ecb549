//! CSV catalog loading.
//!
//! The source is the semicolon-delimited CSV written by the external scrape
//! job. Type coercion is an explicit per-field policy applied once here:
//! a single bad cell never fails the load, the offending field falls back
//! to its zero value and the coercion is logged.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::warn;

use super::{Book, Catalog, LoadError};

/// Columns the CSV must carry, named as the scraper writes them.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "titulo",
    "preco",
    "avaliacao",
    "disponibilidade",
    "estoque",
    "categoria",
    "imagem",
];

/// Load the catalog from a CSV file.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let file = std::fs::File::open(path)?;
    read_catalog(file)
}

/// Load the catalog from any reader (useful for testing).
pub fn read_catalog<R: Read>(source: R) -> Result<Catalog, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();

    let mut columns = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }
    let [titulo, preco, avaliacao, disponibilidade, estoque, categoria, imagem] = columns;

    let mut books = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::Malformed(e.to_string()))?;
        let field = |col: usize| record.get(col).unwrap_or("").trim();

        books.push(Book {
            // Reassigned by Catalog::new, set here for completeness
            id: row as u32,
            title: field(titulo).to_string(),
            price: coerce_price(field(preco), row),
            rating: coerce_rating(field(avaliacao), row),
            in_stock: coerce_bool(field(disponibilidade), row),
            stock_count: coerce_stock(field(estoque), row),
            category: match field(categoria) {
                "" => None,
                c => Some(c.to_string()),
            },
            image_url: field(imagem).to_string(),
        });
    }

    Ok(Catalog::new(books))
}

fn coerce_price(raw: &str, row: usize) -> f64 {
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => v,
        Ok(v) => {
            warn!(row, value = v, "invalid price coerced to 0");
            0.0
        }
        Err(_) => {
            warn!(row, value = raw, "unparseable price coerced to 0");
            0.0
        }
    }
}

fn coerce_rating(raw: &str, row: usize) -> f64 {
    match raw.parse::<f64>() {
        Ok(v) if (0.0..=5.0).contains(&v) => v,
        Ok(v) => {
            let clamped = v.clamp(0.0, 5.0);
            let clamped = if clamped.is_nan() { 0.0 } else { clamped };
            warn!(row, value = v, clamped, "out-of-range rating clamped");
            clamped
        }
        Err(_) => {
            warn!(row, value = raw, "unparseable rating coerced to 0");
            0.0
        }
    }
}

fn coerce_bool(raw: &str, row: usize) -> bool {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" | "" => false,
        _ => {
            warn!(row, value = raw, "unparseable availability coerced to false");
            false
        }
    }
}

fn coerce_stock(raw: &str, row: usize) -> u32 {
    // Some scraped exports carry stock as a float ("22.0")
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => v as u32,
        Ok(v) => {
            warn!(row, value = v, "invalid stock count coerced to 0");
            0
        }
        Err(_) => {
            warn!(row, value = raw, "unparseable stock count coerced to 0");
            0
        }
    }
}
