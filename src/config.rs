//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::stream::Pacing;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of cached answers
    pub cache_capacity: usize,
    /// Maximum number of uploads waiting to be installed
    pub upload_queue_size: usize,
    /// Pause after installing a document, in milliseconds
    pub settle_delay_ms: u64,
    /// Endpoint of the external answering service
    pub answer_service_url: String,
    /// Timeout for one answering service call, in seconds
    pub answer_timeout_secs: u64,
    /// Delay between chunks of a cached answer, in milliseconds
    pub hit_chunk_delay_ms: u64,
    /// Delay between chunks of a fresh answer, in milliseconds
    pub fresh_chunk_delay_ms: u64,
    /// The only origin allowed to call the API from a browser
    pub allowed_origin: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CACHE_CAPACITY` - Maximum cached answers (default: 100)
    /// - `UPLOAD_QUEUE_SIZE` - Pending upload bound (default: 10)
    /// - `SETTLE_DELAY_MS` - Pause after each install (default: 500)
    /// - `ANSWER_SERVICE_URL` - Answering endpoint (default: http://localhost:5000/rag)
    /// - `ANSWER_TIMEOUT_SECS` - Answering call timeout (default: 30)
    /// - `HIT_CHUNK_DELAY_MS` - Cached answer pacing (default: 50)
    /// - `FRESH_CHUNK_DELAY_MS` - Fresh answer pacing (default: 100)
    /// - `ALLOWED_ORIGIN` - CORS origin (default: http://localhost:3000)
    ///
    /// Values that fail to parse fall back to their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            cache_capacity: parse_var("CACHE_CAPACITY", defaults.cache_capacity),
            upload_queue_size: parse_var("UPLOAD_QUEUE_SIZE", defaults.upload_queue_size),
            settle_delay_ms: parse_var("SETTLE_DELAY_MS", defaults.settle_delay_ms),
            answer_service_url: env::var("ANSWER_SERVICE_URL")
                .unwrap_or(defaults.answer_service_url),
            answer_timeout_secs: parse_var("ANSWER_TIMEOUT_SECS", defaults.answer_timeout_secs),
            hit_chunk_delay_ms: parse_var("HIT_CHUNK_DELAY_MS", defaults.hit_chunk_delay_ms),
            fresh_chunk_delay_ms: parse_var("FRESH_CHUNK_DELAY_MS", defaults.fresh_chunk_delay_ms),
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(self.answer_timeout_secs)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            cached: Duration::from_millis(self.hit_chunk_delay_ms),
            fresh: Duration::from_millis(self.fresh_chunk_delay_ms),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cache_capacity: 100,
            upload_queue_size: 10,
            settle_delay_ms: 500,
            answer_service_url: "http://localhost:5000/rag".to_string(),
            answer_timeout_secs: 30,
            hit_chunk_delay_ms: 50,
            fresh_chunk_delay_ms: 100,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.upload_queue_size, 10);
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
        assert_eq!(config.answer_timeout(), Duration::from_secs(30));
        assert_eq!(config.allowed_origin, "http://localhost:3000");
    }

    #[test]
    fn test_pacing_from_config() {
        let config = Config::default();
        let pacing = config.pacing();
        assert_eq!(pacing, Pacing::default());
        assert!(pacing.cached < pacing.fresh);
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("DOC_QUERY_TEST_GARBAGE", "not-a-number");
        assert_eq!(parse_var("DOC_QUERY_TEST_GARBAGE", 7usize), 7);
        env::remove_var("DOC_QUERY_TEST_GARBAGE");
        assert_eq!(parse_var("DOC_QUERY_TEST_MISSING", 3u64), 3);
    }
}
