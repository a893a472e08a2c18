//! Response DTOs for the query server API
//!
//! Defines the structure of outgoing JSON response bodies. Query answers are
//! streamed as server-sent events and have no DTO.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `POST /upload`
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    /// Uploads waiting ahead of (and including) this one
    pub pending: usize,
}

impl UploadResponse {
    /// Acknowledges that the upload was queued, not that it was processed.
    pub fn queued(pending: usize) -> Self {
        Self {
            message: "File queued for processing".to_string(),
            pending,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of full invalidations caused by uploads
    pub clears: u64,
    /// Current number of cached answers
    pub total_entries: usize,
    /// Maximum number of cached answers
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Version of the current document, 0 if none
    pub document_version: u64,
    /// Uploads queued but not yet installed
    pub pending_uploads: usize,
}

impl StatsResponse {
    pub fn new(
        stats: &CacheStats,
        capacity: usize,
        document_version: u64,
        pending_uploads: usize,
    ) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            clears: stats.clears,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
            document_version,
            pending_uploads,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_serialize() {
        let resp = UploadResponse::queued(2);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["message"], "File queued for processing");
        assert_eq!(json["pending"], 2);
    }

    #[test]
    fn test_stats_response_from_cache_stats() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_clear();
        stats.set_total_entries(4);

        let resp = StatsResponse::new(&stats, 100, 3, 1);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
        assert_eq!(resp.clears, 1);
        assert_eq!(resp.total_entries, 4);
        assert_eq!(resp.document_version, 3);
        assert_eq!(resp.pending_uploads, 1);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Query is required");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Query is required"}"#);
    }
}
