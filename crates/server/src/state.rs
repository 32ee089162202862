use std::sync::Arc;

use service::catalog::{InMemoryProductStore, ProductStore};

/// Shared router state; each instance owns its own product store.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<dyn ProductStore>,
}

impl ServerState {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Fresh, empty in-memory catalog.
    pub fn in_memory(validate: bool) -> Self {
        Self::new(Arc::new(InMemoryProductStore::new(validate)))
    }
}
