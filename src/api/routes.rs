//! API Routes
//!
//! Configures the Axum router with all query server endpoints.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, query_handler, stats_handler, upload_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /upload` - Queue a new document (multipart field `file`)
/// - `GET /query?q=` - Stream the answer as server-sent events
/// - `GET /stats` - Cache and ingest statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Only `allowed_origin` may call the API from a browser
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/upload", post(upload_handler))
        .route("/query", get(query_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy: one trusted origin, GET/POST/OPTIONS, `Content-Type` only.
///
/// The origin is matched against the request so other origins get no
/// `Access-Control-Allow-Origin` header at all.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
