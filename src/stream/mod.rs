//! Stream Emitter Module
//!
//! Turns a complete answer into a lazy, paced, ordered sequence of chunks.
//!
//! Nothing is produced ahead of the consumer: each chunk is built when the
//! previous one has been taken. When the client goes away the transport
//! drops the stream and emission stops at the next suspension point.

use std::time::Duration;

use async_stream::stream;
use futures::Stream;
use tracing::debug;

use crate::document::NO_DOCUMENT_MESSAGE;
use crate::query::Resolution;

/// Delay between chunks of an answer served from the cache
pub const DEFAULT_CACHED_DELAY: Duration = Duration::from_millis(50);
/// Delay between chunks of a freshly computed answer
pub const DEFAULT_FRESH_DELAY: Duration = Duration::from_millis(100);

// == Pacing ==
/// Inter-chunk delays for the two kinds of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub cached: Duration,
    pub fresh: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            cached: DEFAULT_CACHED_DELAY,
            fresh: DEFAULT_FRESH_DELAY,
        }
    }
}

/// Splits an answer into whitespace-delimited chunks, in order.
pub fn split_chunks(answer: &str) -> Vec<String> {
    answer.split_whitespace().map(str::to_string).collect()
}

/// Builds the chunk stream for a resolved query.
pub fn emit(resolution: Resolution, pacing: Pacing) -> impl Stream<Item = String> + Send + 'static {
    let (chunks, delay) = match resolution {
        Resolution::Cached(answer) => (split_chunks(&answer), pacing.cached),
        Resolution::Fresh(answer) => (split_chunks(&answer), pacing.fresh),
        Resolution::NoDocument => (vec![NO_DOCUMENT_MESSAGE.to_string()], Duration::ZERO),
    };
    paced(chunks, delay)
}

/// Yields `chunks` in order, waiting `delay` before every chunk but the first.
pub fn paced(chunks: Vec<String>, delay: Duration) -> impl Stream<Item = String> + Send + 'static {
    stream! {
        let mut progress = Progress::new(chunks.len());
        for (i, chunk) in chunks.into_iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            yield chunk;
            progress.delivered += 1;
        }
        progress.done = true;
    }
}

/// Logs how far a stream got if it is dropped before the last chunk.
struct Progress {
    total: usize,
    delivered: usize,
    done: bool,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            delivered: 0,
            done: false,
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if !self.done {
            debug!(
                delivered = self.delivered,
                total = self.total,
                "Client stopped reading, answer stream abandoned"
            );
        }
    }
}
