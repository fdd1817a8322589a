//! Store abstraction and its implementations.
//!
//! Handlers depend only on the [`Store`] trait; the concrete backend is
//! resolved by name through the [`registry::StoreRegistry`] at startup.

pub mod memory;
pub mod registry;

pub use memory::MemStore;
pub use registry::StoreRegistry;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Book;

/// Errors a store operation can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("book {0:?} not found")]
    NotFound(String),

    #[error("book {0:?} already exists")]
    AlreadyExists(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Capability interface every catalog backend must satisfy.
///
/// Callers receive and hand over independent copies; mutating a `Book` after
/// a call returns never affects stored state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new book. Fails with [`StoreError::AlreadyExists`] if a
    /// record with the same id is already present.
    async fn create(&self, book: &Book) -> StoreResult<()>;

    /// Merge non-empty fields of `book` into the stored record with the same
    /// id. Fails with [`StoreError::NotFound`] if no such record exists; the
    /// id itself is never altered.
    async fn update(&self, book: &Book) -> StoreResult<()>;

    /// Fetch a copy of the book with the given id.
    async fn get_by_id(&self, id: &str) -> StoreResult<Book>;

    /// Fetch copies of all books, in arbitrary order.
    async fn get_all(&self) -> StoreResult<Vec<Book>>;

    /// Remove the book with the given id. A second delete of the same id
    /// fails with [`StoreError::NotFound`].
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}
