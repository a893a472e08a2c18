//! API Module
//!
//! HTTP handlers and routing for the query server.
//!
//! # Endpoints
//! - `POST /upload` - Queue a new document
//! - `GET /query?q=` - Stream an answer as server-sent events
//! - `GET /stats` - Cache and ingest statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_layer, create_router};
