//! HTTP server assembly

pub mod router;

pub use router::build_router;

use std::sync::Arc;

use crate::storage::Store;

/// Application state shared across handlers
///
/// The store is an injected dependency rather than a module-level
/// singleton; the binary wires in the PostgreSQL backend and tests
/// substitute the in-memory one.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
