//! Backend selection by name.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::{MemStore, Store};

/// Constructor for a store backend.
pub type StoreFactory = Box<dyn Fn() -> Arc<dyn Store> + Send + Sync>;

/// Raised when startup asks for a backend nobody registered.
#[derive(Debug, Error)]
#[error("unknown store backend {0:?}")]
pub struct UnknownBackend(pub String);

/// Explicit name → factory table, built at startup and passed by reference
/// to whatever needs backend selection. Callers never name a concrete store
/// type; satisfying [`Store`] is the only requirement.
#[derive(Default)]
pub struct StoreRegistry {
    factories: HashMap<String, StoreFactory>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all built-in backends registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("mem", Box::new(|| Arc::new(MemStore::new()) as Arc<dyn Store>));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: StoreFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Build the backend registered under `name`.
    pub fn build(&self, name: &str) -> Result<Arc<dyn Store>, UnknownBackend> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| UnknownBackend(name.to_string()))?;
        Ok(factory())
    }
}
