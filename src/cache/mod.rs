//! Cache Module
//!
//! Bounded LRU cache mapping query text to previously computed answers.

mod entry;
mod handle;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::QueryCache;
pub use lru::LruOrder;
pub use stats::CacheStats;
pub use store::LruCache;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 100;
