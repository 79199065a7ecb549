use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_core::{
    load_catalog, load_config, seed_bootstrap_admin, validate_config, Authenticator, ScrapeRunner,
    SqliteUserStore, TokenService, UserStore, DEFAULT_ADMIN_PASSWORD,
};

use libris_server::api::create_router;
use libris_server::metrics::CATALOG_BOOKS;
use libris_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("LIBRIS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Catalog CSV: {:?}", config.catalog.csv_path);
    info!("Database path: {:?}", config.database.path);

    // Compute config hash so a config change is visible in the logs
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(version = VERSION, config_hash = &config_hash[..16], "libris starting");

    // Load the catalog snapshot. A missing or unreadable CSV is fatal:
    // serving an empty catalog would silently hide a broken scrape.
    let catalog = load_catalog(&config.catalog.csv_path)
        .with_context(|| format!("Failed to load catalog from {:?}", config.catalog.csv_path))?;
    info!(books = catalog.len(), "catalog loaded");
    CATALOG_BOOKS.set(catalog.len() as i64);

    // Create the credential store and bootstrap admin
    let users: Arc<dyn UserStore> = Arc::new(
        SqliteUserStore::new(&config.database.path).context("Failed to open user store")?,
    );
    let admin = &config.auth.bootstrap_admin;
    seed_bootstrap_admin(users.as_ref(), &admin.username, &admin.password)
        .context("Failed to seed bootstrap admin")?;
    if admin.password == DEFAULT_ADMIN_PASSWORD {
        warn!("Bootstrap admin is using the default password; change it before exposing the server");
    }

    let tokens = TokenService::new(
        &config.auth.secret,
        chrono::Duration::minutes(config.auth.token_ttl_minutes),
    );
    let authenticator = Arc::new(Authenticator::new(users, tokens));

    // Create the scrape runner if configured
    let scraper = match &config.scraper {
        Some(scraper_config) => {
            info!(command = %scraper_config.command, "scrape trigger enabled");
            Some(Arc::new(ScrapeRunner::new(scraper_config.clone())))
        }
        None => {
            info!("No scraper configured, trigger endpoint will report unavailable");
            None
        }
    };

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(catalog),
        authenticator,
        scraper,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
