//! End-to-end tests over the full in-process HTTP stack.
//!
//! These tests build the real router over a known six-book catalog and
//! exercise every endpoint through HTTP, including the auth gate around
//! the scrape trigger.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestConfig, TestFixture};

// --- Health and config ---

#[tokio::test]
async fn test_health_reports_catalog_summary() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "OK");
    assert_eq!(response.body["books_loaded"], 6);
    assert_eq!(response.body["category_count"], 4);
    assert!(response.body["mensagem"].is_string());
    assert!(response.body["checked_at"].is_string());
    assert!(response.body["latency_ms"].is_number());
    let categories: Vec<&str> = response.body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Fiction", "Mystery", "Poetry", "Science"]);
}

#[tokio::test]
async fn test_config_endpoint_redacts_secrets() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["auth"]["secret_configured"], true);
    assert_eq!(response.body["auth"]["token_ttl_minutes"], 30);
    assert_eq!(response.body["auth"]["bootstrap_admin_username"], "admin");
    assert_eq!(response.body["scraper"]["command"], "true");
    assert_eq!(response.body["scraper"]["arg_count"], 0);

    let serialized = serde_json::to_string(&response.body).unwrap();
    assert!(!serialized.contains("test-secret"));
    assert!(!serialized.contains("admin123"));
}

// --- Catalog queries ---

#[tokio::test]
async fn test_list_books_returns_all_with_dense_ids() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books").await;

    assert_status!(response, StatusCode::OK);
    let books = response.body.as_array().unwrap();
    assert_eq!(books.len(), 6);
    for (i, book) in books.iter().enumerate() {
        assert_eq!(book["id"], i);
    }
    assert_eq!(books[0]["title"], "A Light in the Attic");
    assert_eq!(books[0]["price"], 51.77);
    assert_eq!(books[0]["in_stock"], true);
    assert_eq!(books[0]["stock_count"], 22);
    assert_eq!(books[0]["category"], "Poetry");
}

#[tokio::test]
async fn test_get_book_by_id() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/3").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["title"], "The Grand Design");
    assert_eq!(response.body["in_stock"], false);
    assert_eq!(response.body["stock_count"], 0);
}

#[tokio::test]
async fn test_get_unknown_book_is_404() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/999").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_uncategorized_book_omits_category() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/4").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["title"], "Set Me Free");
    assert!(response.body.get("category").is_none());
}

#[tokio::test]
async fn test_search_by_title_is_case_insensitive() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/search?title=THE").await;

    assert_status!(response, StatusCode::OK);
    let titles: Vec<&str> = response.body.as_array().unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A Light in the Attic", "The Grand Design"]);
}

#[tokio::test]
async fn test_search_by_category() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/search?category=poetry").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_with_both_filters() {
    let fixture = TestFixture::new();
    let response = fixture
        .get("/api/v1/books/search?title=moon&category=poetry")
        .await;

    assert_status!(response, StatusCode::OK);
    let books = response.body.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Full Moon over Noahs Ark");
}

#[tokio::test]
async fn test_search_without_filters_returns_everything() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/search").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_search_unknown_category_is_empty() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/search?category=cooking").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_top_rated_orders_by_rating_desc() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/top-rated?limit=2").await;

    assert_status!(response, StatusCode::OK);
    let titles: Vec<&str> = response.body.as_array().unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    // Ties keep catalog order
    assert_eq!(titles, vec!["Set Me Free", "Full Moon over Noahs Ark"]);
}

#[tokio::test]
async fn test_top_rated_default_limit() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/top-rated").await;

    assert_status!(response, StatusCode::OK);
    let books = response.body.as_array().unwrap();
    assert_eq!(books.len(), 6);
    assert_eq!(books[0]["rating"], 5.0);
}

#[tokio::test]
async fn test_top_rated_rejects_bad_limits() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/books/top-rated?limit=0").await;
    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);

    let response = fixture.get("/api/v1/books/top-rated?limit=101").await;
    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_price_range_bounds_are_inclusive() {
    let fixture = TestFixture::new();

    let response = fixture
        .get("/api/v1/books/price-range?min=40&max=52")
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 3);

    let response = fixture
        .get("/api/v1/books/price-range?min=51.77&max=51.77")
        .await;
    assert_status!(response, StatusCode::OK);
    let books = response.body.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "A Light in the Attic");
}

#[tokio::test]
async fn test_price_range_defaults_cover_catalog() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/price-range").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_price_range_rejects_negative_bounds() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/books/price-range?min=-1").await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_price_range_inverted_bounds_is_empty() {
    let fixture = TestFixture::new();
    let response = fixture
        .get("/api/v1/books/price-range?min=50&max=40")
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_categories_sorted_distinct() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/categories").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body,
        json!(["Fiction", "Mystery", "Poetry", "Science"])
    );
}

// --- Aggregates ---

#[tokio::test]
async fn test_stats_overview() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/stats/overview").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["count"], 6);
    assert_eq!(response.body["mean_price"], 39.11);
    assert_eq!(response.body["mean_rating"], 3.33);
    assert_eq!(response.body["total_stock"], 96);
}

#[tokio::test]
async fn test_stats_by_category_excludes_uncategorized() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/stats/categories").await;

    assert_status!(response, StatusCode::OK);
    let stats = response.body.as_array().unwrap();
    assert_eq!(stats.len(), 4);

    let categories: Vec<&str> = stats
        .iter()
        .map(|s| s["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Fiction", "Mystery", "Poetry", "Science"]);

    let poetry = &stats[2];
    assert_eq!(poetry["count"], 2);
    assert_eq!(poetry["mean_price"], 52.76);
    assert_eq!(poetry["mean_rating"], 3.5);
    assert_eq!(poetry["total_stock"], 37);
}

// --- Auth ---

#[tokio::test]
async fn test_login_issues_token() {
    let fixture = TestFixture::new();
    let response = fixture
        .post(
            "/api/v1/auth/login",
            json!({ "username": "admin", "password": "admin123" }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert!(!response.body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(response.body["token_type"], "bearer");
    assert_eq!(response.body["expires_in"], 1800);
}

#[tokio::test]
async fn test_login_failures_do_not_reveal_which_part_was_wrong() {
    let fixture = TestFixture::new();

    let wrong_password = fixture
        .post(
            "/api/v1/auth/login",
            json!({ "username": "admin", "password": "nope" }),
        )
        .await;
    assert_status!(wrong_password, StatusCode::UNAUTHORIZED);

    let unknown_user = fixture
        .post(
            "/api/v1/auth/login",
            json!({ "username": "nobody", "password": "admin123" }),
        )
        .await;
    assert_status!(unknown_user, StatusCode::UNAUTHORIZED);

    assert_eq!(wrong_password.body["error"], unknown_user.body["error"]);
}

#[tokio::test]
async fn test_refresh_exchanges_valid_token() {
    let fixture = TestFixture::new();
    let token = fixture.token_for("reader", "reader123").await;

    let response = fixture
        .post_with_token("/api/v1/auth/refresh", &token)
        .await;

    assert_status!(response, StatusCode::OK);
    assert!(!response.body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(response.body["token_type"], "bearer");
}

#[tokio::test]
async fn test_refresh_without_token_is_unauthorized() {
    let fixture = TestFixture::new();
    let response = fixture
        .post("/api/v1/auth/refresh", json!({}))
        .await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_garbage_token_is_unauthorized() {
    let fixture = TestFixture::new();
    let response = fixture
        .post_with_token("/api/v1/auth/refresh", "garbage")
        .await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
}

// --- Scrape trigger ---

#[tokio::test]
async fn test_trigger_requires_token() {
    let fixture = TestFixture::new();
    let response = fixture
        .post("/api/v1/scraping/trigger", json!({}))
        .await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trigger_requires_admin() {
    let fixture = TestFixture::new();
    let token = fixture.token_for("reader", "reader123").await;

    let response = fixture
        .post_with_token("/api/v1/scraping/trigger", &token)
        .await;

    assert_status!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_trigger_runs_scrape_as_admin() {
    let fixture = TestFixture::new();
    let token = fixture.token_for("admin", "admin123").await;

    let response = fixture
        .post_with_token("/api/v1/scraping/trigger", &token)
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["exit_code"], 0);
    assert!(response.body["duration_ms"].is_number());
}

#[tokio::test]
async fn test_trigger_reports_failed_scrape() {
    let fixture = TestFixture::with_config(TestConfig::failing_scraper());
    let token = fixture.token_for("admin", "admin123").await;

    let response = fixture
        .post_with_token("/api/v1/scraping/trigger", &token)
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["exit_code"], 1);
}

#[tokio::test]
async fn test_trigger_without_scraper_is_unavailable() {
    let fixture = TestFixture::with_config(TestConfig::without_scraper());
    let token = fixture.token_for("admin", "admin123").await;

    let response = fixture
        .post_with_token("/api/v1/scraping/trigger", &token)
        .await;

    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
}

// --- Metrics ---

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let fixture = TestFixture::new();
    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
}
