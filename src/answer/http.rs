//! HTTP Answering Client
//!
//! Posts `{document, query}` as JSON and expects `{response}` back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::{AnswerError, AnswerRequest, AnswerResponse, AnswerService};

/// Answering service reached over HTTP with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpAnswerService {
    /// Creates a client for the service at `url`.
    ///
    /// Every request, including reading the body, is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AnswerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnswerError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify(&self, err: reqwest::Error) -> AnswerError {
        if err.is_timeout() {
            AnswerError::Timeout(self.timeout.as_secs())
        } else if err.is_decode() {
            AnswerError::Decode(err.to_string())
        } else {
            AnswerError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn answer(&self, document: &str, query: &str) -> Result<String, AnswerError> {
        let payload = AnswerRequest {
            document: document.to_string(),
            query: query.to_string(),
        };

        debug!(url = %self.url, query_len = query.len(), "Calling answering service");

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if response.status() != StatusCode::OK {
            return Err(AnswerError::Status(response.status().as_u16()));
        }

        let body: AnswerResponse = response.json().await.map_err(|e| self.classify(e))?;
        Ok(body.response)
    }
}
