use lru::LruCache;
use std::{fmt::Display, hash::Hash, num::NonZeroUsize, sync::Arc};
use tokio::sync::Mutex;

use crate::models::MetadataRecord;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Metadata keyed by the exact title string, no case folding
    Metadata(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Metadata(title) => write!(f, "meta:{}", title),
        }
    }
}

/// Bounded in-process cache with least-recently-used eviction
///
/// Cloning shares the underlying storage.
pub struct Cache<K, V> {
    entries: Arc<Mutex<LruCache<K, V>>>,
    capacity: NonZeroUsize,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            capacity: self.capacity,
        }
    }
}

impl<K: Hash + Eq, V: Clone> Cache<K, V> {
    /// Creates a cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            capacity,
        }
    }

    /// Returns a copy of the cached value and marks it recently used
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Inserts or replaces a value, evicting the least recently used entry when full
    pub async fn put(&self, key: K, value: V) {
        self.entries.lock().await.put(key, value);
    }

    pub async fn remove(&self, key: &K) -> Option<V> {
        self.entries.lock().await.pop(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

/// Cache of metadata lookups shared by all sessions
pub type MetadataCache = Cache<CacheKey, MetadataRecord>;
