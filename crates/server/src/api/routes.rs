use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{auth, books, handlers, scraping, stats};
use crate::metrics::metrics_handler;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Admin routes: bearer token required, identity resolved by middleware
    let protected_routes = Router::new()
        .route("/scraping/trigger", post(scraping::trigger))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog queries
        .route("/books", get(books::list_books))
        .route("/books/search", get(books::search_books))
        .route("/books/top-rated", get(books::top_rated))
        .route("/books/price-range", get(books::price_range))
        .route("/books/{id}", get(books::get_book))
        .route("/categories", get(books::list_categories))
        // Aggregates
        .route("/stats/overview", get(stats::overview))
        .route("/stats/categories", get(stats::by_category))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .merge(protected_routes)
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
}
