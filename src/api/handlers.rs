//! API Handlers
//!
//! HTTP request handlers for each query server endpoint.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{sse::Event, IntoResponse, Response, Sse},
    Json,
};
use futures::StreamExt;
use tracing::info;

use crate::answer::AnswerService;
use crate::cache::QueryCache;
use crate::config::Config;
use crate::document::DocumentMailbox;
use crate::error::{AppError, Result};
use crate::models::{HealthResponse, QueryParams, StatsResponse, UploadResponse};
use crate::query::QueryResolver;
use crate::stream::{self, Pacing};
use crate::tasks::{upload_channel, UploadQueue, UploadReceiver};

/// Multipart field carrying the uploaded document
pub const UPLOAD_FIELD: &str = "file";

/// Application state shared across all handlers.
///
/// Every field is a handle to a process-wide service; cloning the state
/// clones the handles, never the services.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<QueryCache>,
    pub mailbox: Arc<DocumentMailbox>,
    pub uploads: UploadQueue,
    pub resolver: Arc<QueryResolver>,
    pub pacing: Pacing,
}

impl AppState {
    /// Wires the cache, mailbox, upload queue and resolver together.
    ///
    /// Returns the consumer side of the upload queue, which the caller must
    /// hand to [`crate::tasks::spawn_ingest_task`].
    pub fn new(
        cache_capacity: usize,
        upload_queue_size: usize,
        answerer: Arc<dyn AnswerService>,
        pacing: Pacing,
    ) -> (Self, UploadReceiver) {
        let cache = Arc::new(QueryCache::new(cache_capacity));
        let mailbox = Arc::new(DocumentMailbox::new(cache.clone()));
        let resolver = Arc::new(QueryResolver::new(cache.clone(), mailbox.clone(), answerer));
        let (uploads, receiver) = upload_channel(upload_queue_size);

        let state = Self {
            cache,
            mailbox,
            uploads,
            resolver,
            pacing,
        };
        (state, receiver)
    }

    /// Creates the state from configuration.
    pub fn from_config(config: &Config, answerer: Arc<dyn AnswerService>) -> (Self, UploadReceiver) {
        Self::new(
            config.cache_capacity,
            config.upload_queue_size,
            answerer,
            config.pacing(),
        )
    }
}

/// Handler for POST /upload
///
/// Queues the text of the multipart `file` field. The response only means
/// the upload was accepted; installation happens on the ingest task.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let text = read_upload(&mut multipart).await?;
    let bytes = text.len();

    state.uploads.enqueue(text)?;
    info!(bytes, "File queued for processing");

    Ok(Json(UploadResponse::queued(state.uploads.pending())))
}

async fn read_upload(multipart: &mut Multipart) -> Result<String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Error reading file: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Error reading file: {}", e)))?;
        let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::InvalidRequest("Error reading file: not valid UTF-8 text".to_string())
        })?;

        if text.trim().is_empty() {
            return Err(AppError::InvalidRequest("Uploaded file is empty".to_string()));
        }
        return Ok(text);
    }

    Err(AppError::InvalidRequest(format!(
        "Error reading file: missing '{}' field",
        UPLOAD_FIELD
    )))
}

/// Handler for GET /query?q=...
///
/// Resolves the query before the stream starts, so client and upstream
/// errors still get a proper status code. The answer then goes out as one
/// `data:` event per chunk.
pub async fn query_handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response> {
    let query = params.validate().map_err(AppError::InvalidRequest)?;
    let resolution = state.resolver.resolve(query).await?;

    let events = stream::emit(resolution, state.pacing)
        .map(|chunk| Ok::<_, Infallible>(Event::default().data(chunk)));

    Ok(([(header::CONNECTION, "keep-alive")], Sse::new(events)).into_response())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let document_version = state.mailbox.version().await;

    Json(StatsResponse::new(
        &stats,
        state.cache.capacity(),
        document_version,
        state.uploads.pending(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
