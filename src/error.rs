//! Error types for the TTL cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the TTL cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key is absent, expired, or held undecodable data
    #[error("Item with key \"{0}\" does not exist")]
    NotFound(String),

    /// Entry passed the existence check but could not be read back
    #[error("Item with key \"{0}\" is invalid")]
    Invalid(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller value cannot be represented as JSON
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The cache has been closed
    #[error("Cache is closed")]
    Closed,

    /// Background sweep could not be scheduled
    #[error("Runtime error: {0}")]
    Runtime(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Serialization(_) => StatusCode::BAD_REQUEST,
            CacheError::Closed => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the TTL cache.
pub type Result<T> = std::result::Result<T, CacheError>;
