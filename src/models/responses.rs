//! Response DTOs for the product API
//!
//! Product bodies are serialized straight from `Product`; these cover the rest.

use serde::Serialize;

/// Plain message body, used for delete confirmations and not-found replies
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a new MessageResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Whether the persistence connector answered
    pub database: bool,
    /// Whether the cache connector answered
    pub cache: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Builds a health report from the connector pings
    pub fn from_pings(database: bool, cache: bool) -> Self {
        let status = if database && cache { "healthy" } else { "degraded" };
        Self {
            status: status.to_string(),
            database,
            cache,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.database && self.cache
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
