pub mod auth;
pub mod books;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod scraping;
pub mod stats;

pub use routes::create_router;
