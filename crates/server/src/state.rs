use std::sync::Arc;

use libris_core::{Authenticator, Catalog, Config, SanitizedConfig, ScrapeRunner};

/// Shared application state.
///
/// The catalog is an immutable snapshot built once at startup, so handlers
/// read it without locking.
pub struct AppState {
    config: Config,
    catalog: Arc<Catalog>,
    authenticator: Arc<Authenticator>,
    scraper: Option<Arc<ScrapeRunner>>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<Catalog>,
        authenticator: Arc<Authenticator>,
        scraper: Option<Arc<ScrapeRunner>>,
    ) -> Self {
        Self {
            config,
            catalog,
            authenticator,
            scraper,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog.as_ref()
    }

    pub fn authenticator(&self) -> &Authenticator {
        self.authenticator.as_ref()
    }

    pub fn scraper(&self) -> Option<&ScrapeRunner> {
        self.scraper.as_deref()
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
