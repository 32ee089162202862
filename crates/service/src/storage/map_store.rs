use std::{borrow::Borrow, collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// Generic in-memory key-value map store.
///
/// Holds a `HashMap<K, V>` behind a single `RwLock` scoped to the whole map:
/// readers share the lock, writers take it exclusively. Every helper acquires
/// the lock, touches the map, clones what it returns and releases the guard
/// before returning, so no caller ever holds it across its own awaits.
#[derive(Clone)]
pub struct MapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Default for MapStore<K, V> {
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<K, V> MapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all values, in unspecified order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or overwrite a value; returns the previous value if any.
    pub async fn insert(&self, key: K, value: V) -> Option<V> {
        let mut map = self.inner.write().await;
        map.insert(key, value)
    }

    /// Remove a key; returns the removed value if it existed.
    pub async fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut map = self.inner.write().await;
        map.remove(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Apply a mutation to the underlying map under one exclusive acquisition.
    ///
    /// Lookups and writes performed inside `f` are atomic with respect to every
    /// other reader and writer of this store.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, ServiceError>,
    {
        let mut map = self.inner.write().await;
        f(&mut map)
    }
}
