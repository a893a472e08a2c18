//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderValue, Request},
    Router,
};
use tokio::sync::Notify;

use doc_query::answer::{AnswerError, AnswerService};
use doc_query::api::create_router;
use doc_query::document::DocumentMailbox;
use doc_query::stream::Pacing;
use doc_query::tasks::UploadReceiver;
use doc_query::AppState;

pub const ORIGIN: &str = "http://localhost:3000";
pub const BOUNDARY: &str = "doc-query-test-boundary";

// == Scripted Answer Service ==
/// Answers from a fixed table; unknown queries fail with status 502.
///
/// With `hold` set, every call signals `entered` and then waits for
/// `release` before answering.
#[derive(Default)]
pub struct ScriptedAnswer {
    answers: HashMap<String, String>,
    echo_document: bool,
    calls: AtomicUsize,
    hold: bool,
    pub entered: Notify,
    pub release: Notify,
}

impl ScriptedAnswer {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            answers: pairs
                .iter()
                .map(|(q, a)| (q.to_string(), a.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Answers every query with "answer from <document>" after being released.
    pub fn held_echo() -> Self {
        Self {
            echo_document: true,
            hold: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerService for ScriptedAnswer {
    async fn answer(&self, document: &str, query: &str) -> Result<String, AnswerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.hold {
            self.entered.notify_one();
            self.release.notified().await;
        }

        if self.echo_document {
            return Ok(format!("answer from {}", document));
        }
        self.answers
            .get(query)
            .cloned()
            .ok_or(AnswerError::Status(502))
    }
}

// == App Construction ==
pub fn fast_pacing() -> Pacing {
    Pacing {
        cached: Duration::from_millis(1),
        fresh: Duration::from_millis(2),
    }
}

/// Builds state and router without starting the ingest task.
pub fn build_app(
    answerer: Arc<ScriptedAnswer>,
    queue_size: usize,
    pacing: Pacing,
) -> (AppState, Router, UploadReceiver) {
    let (state, receiver) = AppState::new(100, queue_size, answerer, pacing);
    let router = create_router(state.clone(), HeaderValue::from_static(ORIGIN));
    (state, router, receiver)
}

// == Requests ==
pub fn upload_request(content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"doc.txt\"\r\nContent-Type: text/plain\r\n\r\n",
        b = BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn query_request(query: &str) -> Request<Body> {
    let encoded: String = query
        .bytes()
        .map(|b| match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect();

    Request::builder()
        .uri(format!("/query?q={}", encoded))
        .body(Body::empty())
        .unwrap()
}

// == Responses ==
pub async fn body_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Extracts the `data:` payload of every event in an SSE body.
pub fn sse_chunks(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter(|event| !event.is_empty())
        .map(|event| event.trim_start_matches("data: ").to_string())
        .collect()
}

pub async fn wait_for_version(mailbox: &DocumentMailbox, version: u64) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while mailbox.version().await < version {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("document was not installed in time");
}
