//! OpenAPI documentation

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "Book catalog REST API"
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::create_book,
        books::update_book,
        books::get_book,
        books::list_books,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::api::health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
