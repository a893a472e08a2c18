//! Request DTOs for the query server API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query string of `GET /query?q=...`
///
/// `q` is optional at the extractor level so a missing parameter is reported
/// with the same 400 body as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl QueryParams {
    /// Returns the query text, or an error message if it is missing or blank.
    pub fn validate(&self) -> Result<&str, String> {
        match self.q.as_deref() {
            Some(q) if !q.trim().is_empty() => Ok(q),
            _ => Err("Query is required".to_string()),
        }
    }
}
