use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scraper: Option<ScraperConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Catalog source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the semicolon-delimited CSV produced by the scraper.
    pub csv_path: PathBuf,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 signing secret for issued tokens.
    pub secret: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
    /// Admin account created on first start if absent.
    #[serde(default)]
    pub bootstrap_admin: BootstrapAdmin,
}

fn default_token_ttl_minutes() -> i64 {
    30
}

/// Bootstrap admin credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapAdmin {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for BootstrapAdmin {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

/// Default bootstrap password, intended for local testing only. The server
/// logs a warning when it is still in use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

/// Database configuration (credential store)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("libris.db")
}

/// External scrape job configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    /// Program to invoke when scraping is triggered.
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory for the scrape job (defaults to the server's).
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraper: Option<SanitizedScraperConfig>,
}

/// Sanitized auth config (signing secret hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub secret_configured: bool,
    pub token_ttl_minutes: i64,
    pub bootstrap_admin_username: String,
}

/// Sanitized scraper config (args may carry credentials, only the command is shown)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedScraperConfig {
    pub command: String,
    pub arg_count: usize,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                secret_configured: !config.auth.secret.is_empty(),
                token_ttl_minutes: config.auth.token_ttl_minutes,
                bootstrap_admin_username: config.auth.bootstrap_admin.username.clone(),
            },
            catalog: config.catalog.clone(),
            server: config.server.clone(),
            database: config.database.clone(),
            scraper: config.scraper.as_ref().map(|s| SanitizedScraperConfig {
                command: s.command.clone(),
                arg_count: s.args.len(),
            }),
        }
    }
}
