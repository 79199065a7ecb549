//! External scrape job invocation.
//!
//! The scraper itself lives outside this process (a browser-automation
//! batch job that rewrites the catalog CSV). Triggering it runs the
//! configured command and waits for it to finish; the running catalog
//! keeps serving the old snapshot until the process is restarted.

use std::process::Stdio;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::ScraperConfig;

/// How much of the child's stderr is kept in the report.
const STDERR_TAIL_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Scraper command not found: {path}")]
    CommandNotFound { path: String },

    #[error("Failed to run scraper: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one scrape invocation. A non-zero exit is reported here,
/// not raised as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr_tail: Option<String>,
}

/// Runs the configured external scrape command.
pub struct ScrapeRunner {
    config: ScraperConfig,
}

impl ScrapeRunner {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Fire-and-wait: no in-process timeout, the HTTP caller's own timeout
    /// is the only bound.
    pub async fn run(&self) -> Result<ScrapeReport, ScraperError> {
        let started = Instant::now();
        info!(command = %self.config.command, "starting scrape job");

        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.config.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScraperError::CommandNotFound {
                    path: self.config.command.clone(),
                }
            } else {
                ScraperError::Io(e)
            }
        })?;

        let duration_ms = started.elapsed().as_millis() as u64;
        let success = output.status.success();
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr_tail = if stderr.trim().is_empty() {
            None
        } else {
            let tail_start = stderr
                .char_indices()
                .rev()
                .nth(STDERR_TAIL_CHARS - 1)
                .map(|(i, _)| i)
                .unwrap_or(0);
            Some(stderr[tail_start..].to_string())
        };

        if success {
            info!(duration_ms, "scrape job finished");
        } else {
            warn!(
                duration_ms,
                exit_code = output.status.code(),
                "scrape job failed"
            );
        }

        Ok(ScrapeReport {
            success,
            exit_code: output.status.code(),
            duration_ms,
            stderr_tail,
        })
    }
}
