//! Error types for the cache server and the framing codec
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
/// Errors surfaced by the string store and the HTTP API.
///
/// The `Lru` container itself never fails; absence is reported as `None`
/// and is mapped to `NotFound` here.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache (never stored, deleted, evicted or expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Frame Error Enum ==
/// Errors raised while writing or validating length-prefixed chunk buffers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A length prefix is truncated or points past the end of the buffer
    #[error("broken structure at offset {offset}")]
    BrokenStructure { offset: usize },

    /// `allocate` was called after `close`
    #[error("the writer already closed")]
    WriterClosed,

    /// Fixed-size buffer cannot hold the requested chunk
    #[error("not enough space - available {available}, but needed {needed}")]
    InsufficientSpace { available: usize, needed: usize },
}
