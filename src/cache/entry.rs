//! Cache Entry Module
//!
//! A single cached answer together with the query it was computed for.

// == Cache Entry ==
/// One cached answer.
///
/// The key is kept next to the value so an evicted slot can be removed
/// from the key index without a reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Query text
    pub key: String,
    /// Answer computed for the query
    pub value: String,
}

impl CacheEntry {
    /// Creates a new cache entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
