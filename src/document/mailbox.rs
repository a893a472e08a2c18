//! Document Mailbox
//!
//! Single-slot holder for the current document. Installing a new document
//! and invalidating the answer cache happen under one lock.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::QueryCache;

// == Document ==
/// The current document and the number of installs that produced it.
///
/// Version 0 with empty text means nothing has been uploaded yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub version: u64,
}

impl Document {
    /// Returns true if no document has been uploaded yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// == Document Mailbox ==
/// Process-wide owner of the current document.
///
/// Lock order is always document, then cache. Nothing acquires the cache
/// lock and then waits on the document lock.
#[derive(Debug)]
pub struct DocumentMailbox {
    current: RwLock<Document>,
    cache: Arc<QueryCache>,
}

impl DocumentMailbox {
    /// Creates an empty mailbox bound to the cache it must invalidate.
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            current: RwLock::new(Document::default()),
            cache,
        }
    }

    // == Set ==
    /// Installs `text` as the current document and clears the cache.
    ///
    /// Both effects happen while the document write lock is held, so a
    /// reader never sees the new document next to answers computed for the
    /// old one. Returns the new version.
    pub async fn set(&self, text: String) -> u64 {
        let mut current = self.current.write().await;
        current.version += 1;
        current.text = text;
        self.cache.clear().await;

        info!(
            version = current.version,
            bytes = current.text.len(),
            "Installed new document and cleared answer cache"
        );
        current.version
    }

    // == Get ==
    /// Returns a copy of the current document.
    pub async fn get(&self) -> Document {
        self.current.read().await.clone()
    }

    pub async fn version(&self) -> u64 {
        self.current.read().await.version
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }
}
