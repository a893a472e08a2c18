//! Error types for the query server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::answer::AnswerError;
use crate::models::ErrorResponse;

/// Seconds a client is asked to wait when the upload queue is full
pub const RETRY_AFTER_SECS: u64 = 1;

// == App Error Enum ==
/// Unified error type for the query server.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed client input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upload queue is full; the client should retry later
    #[error("Busy: {0}")]
    Busy(String),

    /// The answering service failed, timed out or returned garbage
    #[error("Upstream error: {0}")]
    Upstream(#[from] AnswerError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Busy(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Upstream(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing query: {}", err),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(ErrorResponse::new(message));

        if matches!(self, AppError::Busy(_)) {
            return (
                status,
                [(header::RETRY_AFTER, RETRY_AFTER_SECS.to_string())],
                body,
            )
                .into_response();
        }

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the query server.
pub type Result<T> = std::result::Result<T, AppError>;
