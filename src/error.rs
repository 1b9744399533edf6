//! Error types for the product service
//!
//! Failures are tagged by origin so callers can tell a database outage from a
//! cache outage. Not-found is an `Option::None` inside the repository and only
//! becomes an error at the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::{ErrorResponse, MessageResponse};

// == Store Error Enum ==
/// Failures raised by a persistence connector.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query or connection failure reported by sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A freshly inserted row could not be read back
    #[error("Product {0} missing after insert")]
    Missing(i64),
}

// == Cache Error Enum ==
/// Failures raised by a cache connector.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Command or connection failure reported by redis
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cache could not be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

// == App Error Enum ==
/// Unified error type returned by the repository and the HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Requested product does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(StoreError::Database(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Cache(CacheError::Serialization(err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(msg.clone()))).into_response()
            }
            AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(self.to_string())))
                    .into_response()
            }
            AppError::Store(_) | AppError::Cache(_) => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(self.to_string())),
                )
                    .into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the product service.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Product not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_request_maps_to_400() {
        let response = AppError::InvalidRequest("name is empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_connector_errors_map_to_500() {
        let store = AppError::from(StoreError::Unavailable("down".to_string()));
        assert_eq!(store.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let cache = AppError::from(CacheError::Unavailable("down".to_string()));
        assert_eq!(cache.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serde_error_is_tagged_as_cache() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(matches!(
            AppError::from(err),
            AppError::Cache(CacheError::Serialization(_))
        ));
    }

    #[test]
    fn test_error_message_is_preserved() {
        let err = AppError::from(StoreError::Unavailable("connection refused".to_string()));
        assert_eq!(err.to_string(), "Store unavailable: connection refused");
    }
}
