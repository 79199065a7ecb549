pub mod auth;
pub mod catalog;
pub mod config;
pub mod scraper;

pub use auth::{
    create_user, seed_bootstrap_admin, AuthError, Authenticator, Claims, Identity,
    SqliteUserStore, TokenService, User, UserStore, UserStoreError,
};
pub use catalog::{
    load_catalog, read_catalog, Book, Catalog, CategoryStats, LoadError, Overview, QueryError,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthConfig, BootstrapAdmin, CatalogConfig,
    Config, ConfigError, DatabaseConfig, SanitizedConfig, ScraperConfig, ServerConfig,
    DEFAULT_ADMIN_PASSWORD,
};
pub use scraper::{ScrapeReport, ScrapeRunner, ScraperError};
