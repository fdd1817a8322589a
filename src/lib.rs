//! Bookstore Catalog Service
//!
//! A small REST JSON API for managing a book catalog, backed by a pluggable
//! store abstraction with an in-memory implementation.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn store::Store>,
}
