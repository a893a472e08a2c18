//! Answering Service Module
//!
//! Contract with the external service that turns a document and a query into
//! a complete answer, plus the HTTP client used in production.

mod http;

pub use http::HttpAnswerService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// == Answer Error ==
/// Why the answering service could not produce an answer.
#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("answering service unreachable: {0}")]
    Transport(String),

    #[error("answering service timed out after {0}s")]
    Timeout(u64),

    #[error("answering service returned status: {0}")]
    Status(u16),

    #[error("invalid answering service response: {0}")]
    Decode(String),
}

// == Wire Types ==
/// Request body sent to the answering service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub document: String,
    pub query: String,
}

/// Successful response body from the answering service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub response: String,
}

// == Answer Service ==
/// Produces a complete answer for `query` against `document`.
///
/// Implementations return the whole answer at once; streaming to the caller
/// happens downstream.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn answer(&self, document: &str, query: &str) -> Result<String, AnswerError>;
}
