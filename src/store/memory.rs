//! Concurrency-safe in-memory store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::Book;

use super::{Store, StoreError, StoreResult};

/// In-memory [`Store`] backed by a keyed map behind a single reader/writer
/// lock. Reads take the shared lock; every mutation performs its whole
/// check-then-act sequence under one exclusive acquisition, so mutations are
/// serialized and readers never observe a partially applied update.
#[derive(Debug, Default)]
pub struct MemStore {
    books: RwLock<HashMap<String, Book>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create(&self, book: &Book) -> StoreResult<()> {
        let mut books = self.books.write().await;

        if books.contains_key(&book.id) {
            return Err(StoreError::AlreadyExists(book.id.clone()));
        }

        books.insert(book.id.clone(), book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> StoreResult<()> {
        let mut books = self.books.write().await;

        let stored = books
            .get_mut(&book.id)
            .ok_or_else(|| StoreError::NotFound(book.id.clone()))?;

        // Partial-update merge: empty incoming fields keep the stored value.
        if !book.name.is_empty() {
            stored.name = book.name.clone();
        }
        if !book.authors.is_empty() {
            stored.authors = book.authors.clone();
        }
        if !book.press.is_empty() {
            stored.press = book.press.clone();
        }

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Book> {
        let books = self.books.read().await;

        books
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn get_all(&self) -> StoreResult<Vec<Book>> {
        let books = self.books.read().await;

        Ok(books.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut books = self.books.write().await;

        books
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
