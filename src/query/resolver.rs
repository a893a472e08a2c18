//! Query Resolver
//!
//! Cache hit, or read the current document, ask the answering service and
//! remember the answer.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::answer::AnswerService;
use crate::cache::QueryCache;
use crate::document::DocumentMailbox;
use crate::error::{AppError, Result};

// == Resolution ==
/// Outcome of resolving one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Answer served from the cache
    Cached(String),
    /// Answer just computed by the answering service
    Fresh(String),
    /// Nothing has been uploaded yet
    NoDocument,
}

// == Query Resolver ==
pub struct QueryResolver {
    cache: Arc<QueryCache>,
    mailbox: Arc<DocumentMailbox>,
    answerer: Arc<dyn AnswerService>,
}

impl QueryResolver {
    pub fn new(
        cache: Arc<QueryCache>,
        mailbox: Arc<DocumentMailbox>,
        answerer: Arc<dyn AnswerService>,
    ) -> Self {
        Self {
            cache,
            mailbox,
            answerer,
        }
    }

    /// Resolves `query` to an answer.
    ///
    /// Neither lock is held while the answering service is called. An answer
    /// is cached under the query even if a new document was installed while
    /// it was being computed.
    ///
    /// # Errors
    /// - `AppError::InvalidRequest` for an empty query
    /// - `AppError::Upstream` if the answering service fails; nothing is cached
    pub async fn resolve(&self, query: &str) -> Result<Resolution> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidRequest("Query is required".to_string()));
        }

        if let Some(answer) = self.cache.get(query).await {
            debug!(query, "Answer cache hit");
            return Ok(Resolution::Cached(answer));
        }

        let document = self.mailbox.get().await;
        if document.is_empty() {
            debug!(query, "Query received before any document upload");
            return Ok(Resolution::NoDocument);
        }

        debug!(query, version = document.version, "Answer cache miss");
        let answer = self
            .answerer
            .answer(&document.text, query)
            .await
            .map_err(|err| {
                error!(query, error = %err, "Answering service failed");
                AppError::from(err)
            })?;

        let current_version = self.mailbox.version().await;
        if current_version != document.version {
            warn!(
                query,
                computed_against = document.version,
                current = current_version,
                "Caching answer computed against a superseded document"
            );
        }

        self.cache.add(query, answer.clone()).await;
        Ok(Resolution::Fresh(answer))
    }
}
