//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failures raised by an item store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a valid snapshot
    #[error("Corrupt store file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded to or decoded from its stored text
    #[error("Value codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Malformed or missing input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Admission denied because the store already holds `max_size` items
    #[error("Cache is full: capacity of {max_size} items reached")]
    CapacityExceeded { max_size: usize },

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Underlying store failure, cause preserved
    #[error("Cache operation '{operation}' failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl CacheError {
    /// Returns a closure wrapping a store failure for the named operation.
    ///
    /// Meant for `map_err` at store call sites.
    pub fn operation(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| CacheError::Operation { operation, source }
    }
}

// == Extractor Rejections ==
impl From<JsonRejection> for CacheError {
    fn from(rejection: JsonRejection) -> Self {
        CacheError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for CacheError {
    fn from(rejection: QueryRejection) -> Self {
        CacheError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Validation(_) => StatusCode::BAD_REQUEST,
            CacheError::CapacityExceeded { .. } => StatusCode::INSUFFICIENT_STORAGE,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            CacheError::Operation { .. } => {
                error!(error = %self, "Cache operation failed");
                "Internal server error".to_string()
            }
            CacheError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
