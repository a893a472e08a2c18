//! Doc Query - single-document question answering server
//!
//! Accepts document uploads, answers queries about the current document and
//! streams the answers back as server-sent events.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doc_query::answer::HttpAnswerService;
use doc_query::api::create_router;
use doc_query::{spawn_ingest_task, AppState, Config};

/// Main entry point for the query server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the answering client, cache, mailbox and upload queue
/// 4. Start the upload ingest task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_query=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Doc Query Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_capacity={}, upload_queue_size={}, settle_delay={}ms, port={}, answer_service={}",
        config.cache_capacity,
        config.upload_queue_size,
        config.settle_delay_ms,
        config.server_port,
        config.answer_service_url
    );

    let answerer = HttpAnswerService::new(config.answer_service_url.clone(), config.answer_timeout())
        .context("failed to build answering service client")?;
    let allowed_origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("invalid ALLOWED_ORIGIN: {}", config.allowed_origin))?;

    let (state, uploads) = AppState::from_config(&config, Arc::new(answerer));
    info!("Answer cache and document mailbox initialized");

    let ingest_handle = spawn_ingest_task(uploads, state.mailbox.clone(), config.settle_delay());
    info!("Upload ingest task started");

    let app = create_router(state, allowed_origin);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ingest_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the ingest task; uploads still queued are dropped.
async fn shutdown_signal(ingest_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    ingest_handle.abort();
    warn!("Ingest task aborted");
}
