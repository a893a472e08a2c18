//! Cache Store Module
//!
//! Bounded LRU cache combining a key index, an entry slab and recency order.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, LruOrder};

// == LRU Cache ==
/// Fixed-capacity key/value store with strict least-recently-used eviction.
///
/// Every key in `index` points at exactly one occupied slot in `slots`, and
/// every occupied slot is linked in `order`. All operations are O(1).
#[derive(Debug)]
pub struct LruCache {
    /// Query text -> slot
    index: HashMap<String, usize>,
    /// Entry storage; `None` marks a free slot
    slots: Vec<Option<CacheEntry>>,
    /// Free slot indices ready for reuse
    free: Vec<usize>,
    /// Recency order over occupied slots
    order: LruOrder,
    stats: CacheStats,
    capacity: usize,
}

impl LruCache {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            order: LruOrder::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Add ==
    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry first. Updating an existing key never changes the size.
    pub fn add(&mut self, key: String, value: String) {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.value = value;
            }
            self.order.move_to_front(slot);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_oldest();
        }

        let entry = CacheEntry::new(key.clone(), value);
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.index.insert(key, slot);
        self.order.push_front(slot);
        self.stats.set_total_entries(self.index.len());
    }

    // == Get ==
    /// Returns the answer cached for `key`, marking it most recently used.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let Some(&slot) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let value = self.slots[slot].as_ref().map(|entry| entry.value.clone());
        self.order.move_to_front(slot);
        self.stats.record_hit();
        value
    }

    // == Clear ==
    /// Drops every entry. Counters other than `total_entries` are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.order.clear();
        self.stats.record_clear();
        self.stats.set_total_entries(0);
    }

    fn evict_oldest(&mut self) {
        let Some(slot) = self.order.pop_back() else {
            return;
        };
        if let Some(evicted) = self.slots[slot].take() {
            self.index.remove(&evicted.key);
            self.stats.record_eviction();
        }
        self.free.push(slot);
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|slot| self.slots[slot].as_ref().map(|entry| entry.key.clone()))
            .collect()
    }

    /// Returns true if `key` is cached, without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn add(cache: &mut LruCache, key: &str, value: &str) {
        cache.add(key.to_string(), value.to_string());
    }

    #[test]
    fn test_cache_new() {
        let cache = LruCache::new(3);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut cache = LruCache::new(0);
        add(&mut cache, "a", "1");
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_add_and_get() {
        let mut cache = LruCache::new(3);

        add(&mut cache, "where is the cat", "the cat sat on the mat");

        assert_eq!(
            cache.get("where is the cat").as_deref(),
            Some("the cat sat on the mat")
        );
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_update_keeps_size_and_moves_to_front() {
        let mut cache = LruCache::new(3);

        add(&mut cache, "a", "1");
        add(&mut cache, "b", "2");
        add(&mut cache, "a", "updated");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.keys_by_recency(), vec!["a", "b"]);
        assert_eq!(cache.get("a").as_deref(), Some("updated"));
    }

    #[test]
    fn test_eviction_of_least_recently_added() {
        let mut cache = LruCache::new(3);

        add(&mut cache, "a", "1");
        add(&mut cache, "b", "2");
        add(&mut cache, "c", "3");
        add(&mut cache, "d", "4");

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains("a"));
        assert_eq!(cache.keys_by_recency(), vec!["d", "c", "b"]);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let mut cache = LruCache::new(3);

        add(&mut cache, "a", "1");
        add(&mut cache, "b", "2");
        add(&mut cache, "c", "3");

        cache.get("a");
        add(&mut cache, "d", "4");

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_update_protects_from_eviction() {
        let mut cache = LruCache::new(2);

        add(&mut cache, "a", "1");
        add(&mut cache, "b", "2");
        add(&mut cache, "a", "1b");
        add(&mut cache, "c", "3");

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut cache = LruCache::new(3);

        add(&mut cache, "a", "1");
        add(&mut cache, "b", "2");
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.keys_by_recency().is_empty());
        assert_eq!(cache.get("a"), None);

        let stats = cache.stats();
        assert_eq!(stats.clears, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_reuse_after_clear_and_eviction() {
        let mut cache = LruCache::new(2);

        add(&mut cache, "a", "1");
        add(&mut cache, "b", "2");
        add(&mut cache, "c", "3");
        cache.clear();
        add(&mut cache, "x", "9");
        add(&mut cache, "y", "8");
        add(&mut cache, "z", "7");

        assert_eq!(cache.keys_by_recency(), vec!["z", "y"]);
        assert_eq!(cache.get("z").as_deref(), Some("7"));
    }

    #[test]
    fn test_stats_hits_and_misses() {
        let mut cache = LruCache::new(3);

        add(&mut cache, "a", "1");
        cache.get("a");
        cache.get("nope");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
