//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the libris server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Authentication failures
//! - Catalog size and scrape trigger outcomes

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use tracing::error;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "libris_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("libris_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "libris_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

/// Authentication failures.
pub static AUTH_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("libris_auth_failures_total", "Total authentication failures"),
        &["reason"],
    )
    .unwrap()
});

/// Number of books in the loaded catalog snapshot.
pub static CATALOG_BOOKS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "libris_catalog_books",
        "Number of books in the loaded catalog",
    )
    .unwrap()
});

/// Scrape trigger outcomes.
pub static SCRAPE_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("libris_scrape_runs_total", "Total scrape job invocations"),
        &["outcome"],
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    let _ = registry.register(Box::new(HTTP_REQUEST_DURATION.clone()));
    let _ = registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = registry.register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()));
    let _ = registry.register(Box::new(AUTH_FAILURES_TOTAL.clone()));
    let _ = registry.register(Box::new(CATALOG_BOOKS.clone()));
    let _ = registry.register(Box::new(SCRAPE_RUNS_TOTAL.clone()));
}

/// GET /metrics
///
/// Render all registered metrics in the Prometheus text format.
pub async fn metrics_handler() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collapse id path segments so metric labels stay low-cardinality.
pub fn normalize_path(path: &str) -> String {
    let numeric_regex = regex_lite::Regex::new(r"/\d+(/|$)").unwrap();
    numeric_regex.replace_all(path, "/{id}$1").to_string()
}
