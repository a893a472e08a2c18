//! Shared Cache Handle
//!
//! Serializes every cache operation through one async mutex so the key index
//! and recency order are never observed out of sync.

use tokio::sync::Mutex;

use crate::cache::{CacheStats, LruCache};

// == Query Cache ==
/// Process-wide answer cache, shared between request tasks by `Arc`.
#[derive(Debug)]
pub struct QueryCache {
    inner: Mutex<LruCache>,
    capacity: usize,
}

impl QueryCache {
    /// Creates a cache holding at most `capacity` answers (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let cache = LruCache::new(capacity);
        Self {
            capacity: cache.capacity(),
            inner: Mutex::new(cache),
        }
    }

    /// Stores `answer` for `query`, evicting the least recently used entry
    /// if the cache is full.
    pub async fn add(&self, query: impl Into<String>, answer: impl Into<String>) {
        self.inner.lock().await.add(query.into(), answer.into());
    }

    /// Returns the cached answer for `query`, if any.
    pub async fn get(&self, query: &str) -> Option<String> {
        self.inner.lock().await.get(query)
    }

    /// Drops every cached answer.
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Keys from most to least recently used.
    pub async fn keys_by_recency(&self) -> Vec<String> {
        self.inner.lock().await.keys_by_recency()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(crate::cache::DEFAULT_CAPACITY)
    }
}
