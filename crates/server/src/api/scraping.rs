//! Scrape trigger handler.

use std::sync::Arc;

use axum::{extract::State, Json};

use libris_core::ScrapeReport;

use super::error::ApiError;
use super::middleware::AuthUser;
use crate::metrics::SCRAPE_RUNS_TOTAL;
use crate::state::AppState;

/// POST /api/v1/scraping/trigger
///
/// Invoke the external scrape job and wait for it to finish. Admin only.
/// The in-memory catalog is not touched; the new CSV is picked up on the
/// next restart.
pub async fn trigger(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ScrapeReport>, ApiError> {
    if !identity.is_admin {
        return Err(ApiError::Forbidden);
    }

    let runner = state
        .scraper()
        .ok_or_else(|| ApiError::Unavailable("No scraper command configured".to_string()))?;

    let report = runner.run().await?;
    let outcome = if report.success { "success" } else { "failure" };
    SCRAPE_RUNS_TOTAL.with_label_values(&[outcome]).inc();

    Ok(Json(report))
}
