//! Common test utilities for E2E testing.
//!
//! This module provides a test fixture that builds an in-process server
//! from a small known CSV catalog and a temp-file credential store, so
//! the full HTTP surface can be exercised without a running process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use libris_core::{
    create_user, load_catalog, load_config_from_str, seed_bootstrap_admin, Authenticator,
    ScrapeRunner, ScraperConfig, SqliteUserStore, TokenService, UserStore,
};

/// Six known books, semicolon-delimited the way the scraper writes them.
///
/// Chosen so the aggregates are easy to assert: the two Poetry books
/// average to 52.76 and one book has no category.
pub const SAMPLE_CSV: &str = "\
titulo;preco;avaliacao;disponibilidade;estoque;categoria;imagem
A Light in the Attic;51.77;3;true;22;Poetry;http://example.com/light.jpg
Full Moon over Noahs Ark;53.74;4;true;15;Poetry;http://example.com/moon.jpg
Sharp Objects;47.82;4;true;20;Mystery;http://example.com/sharp.jpg
The Grand Design;13.76;3;false;0;Science;http://example.com/grand.jpg
Set Me Free;17.46;5;true;19;;http://example.com/free.jpg
Soumission;50.10;1;true;20;Fiction;http://example.com/soumission.jpg
";

/// Test fixture holding an in-process router over the sample catalog.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Temporary directory for the CSV and the credential database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for the test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Scrape command the trigger endpoint runs; None disables the trigger.
    pub scraper_command: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            scraper_command: Some("true".to_string()),
        }
    }
}

impl TestConfig {
    /// No scraper configured; the trigger endpoint reports 503.
    pub fn without_scraper() -> Self {
        Self {
            scraper_command: None,
        }
    }

    /// Scrape command that exits non-zero.
    pub fn failing_scraper() -> Self {
        Self {
            scraper_command: Some("false".to_string()),
        }
    }
}

impl TestFixture {
    /// Create a fixture over the sample catalog with a working scraper.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let csv_path = temp_dir.path().join("books.csv");
        let db_path = temp_dir.path().join("test.db");
        std::fs::write(&csv_path, SAMPLE_CSV).expect("Failed to write sample CSV");

        let scraper_section = match &test_config.scraper_command {
            Some(command) => format!("\n[scraper]\ncommand = \"{command}\"\n"),
            None => String::new(),
        };
        let config = load_config_from_str(&format!(
            r#"
[auth]
secret = "test-secret"

[catalog]
csv_path = "{csv}"

[database]
path = "{db}"
{scraper}"#,
            csv = csv_path.display(),
            db = db_path.display(),
            scraper = scraper_section,
        ))
        .expect("Failed to parse test config");

        let catalog = load_catalog(&csv_path).expect("Failed to load sample catalog");

        let users: Arc<dyn UserStore> =
            Arc::new(SqliteUserStore::new(&db_path).expect("Failed to create user store"));
        seed_bootstrap_admin(users.as_ref(), "admin", "admin123")
            .expect("Failed to seed admin");
        create_user(users.as_ref(), "reader", "reader123", false)
            .expect("Failed to create reader");

        let authenticator = Arc::new(Authenticator::new(
            users,
            TokenService::new("test-secret", Duration::minutes(30)),
        ));

        let scraper = test_config.scraper_command.map(|command| {
            Arc::new(ScrapeRunner::new(ScraperConfig {
                command,
                args: Vec::new(),
                workdir: None,
            }))
        });

        let state = Arc::new(libris_server::state::AppState::new(
            config,
            Arc::new(catalog),
            authenticator,
            scraper,
        ));

        let router = libris_server::api::create_router(state);

        Self { router, temp_dir }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), None).await
    }

    /// Send a POST request with a bearer token and empty body.
    pub async fn post_with_token(&self, path: &str, token: &str) -> TestResponse {
        self.request("POST", path, None, Some(token)).await
    }

    /// Log in and return the issued bearer token.
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/v1/auth/login",
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "login failed: {}",
            response.body
        );
        response.body["access_token"]
            .as_str()
            .expect("login response missing access_token")
            .to_string()
    }

    /// Send a request to the test server.
    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            request_builder = request_builder.header("Authorization", format!("Bearer {token}"));
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
