//! API handlers and router for the bookstore REST endpoints

pub mod books;
pub mod health;
pub mod middleware;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the application router with all routes.
///
/// Every /book route sits behind the JSON content-type gate; the health and
/// OpenAPI probes take no body and stay outside it. Request logging wraps
/// everything.
pub fn router(state: AppState) -> Router {
    let books = Router::new()
        .route("/book", post(books::create_book).get(books::list_books))
        .route(
            "/book/:id",
            post(books::update_book)
                .get(books::get_book)
                .delete(books::delete_book),
        )
        .layer(axum::middleware::from_fn(middleware::require_json))
        .with_state(state);

    Router::new()
        .merge(books)
        .route("/health", get(health::health_check))
        .merge(openapi::create_openapi_router())
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(TraceLayer::new_for_http())
}
