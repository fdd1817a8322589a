//! Book (catalog) endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::Book,
    AppState,
};

/// Create a new book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = Book,
    responses(
        (status = 200, description = "Book created"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Book already exists", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<Book>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(book) = body?;

    if book.id.is_empty() {
        return Err(AppError::BadRequest("book id is required".to_string()));
    }

    state.store.create(&book).await?;
    Ok(StatusCode::OK)
}

/// Update an existing book; empty fields are left unchanged
#[utoipa::path(
    post,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ISBN")
    ),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Book>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(mut book) = body?;

    // The path id is authoritative; any id in the body is ignored.
    book.id = id;

    state.store.update(&book).await?;
    Ok(StatusCode::OK)
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.store.get_by_id(&id).await?;
    Ok(Json(book))
}

/// List all books, in arbitrary order
#[utoipa::path(
    get,
    path = "/book",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = [Book])
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.store.get_all().await?;
    Ok(Json(books))
}

/// Delete a book by id
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.store.delete_by_id(&id).await?;
    Ok(StatusCode::OK)
}
