//! Error types for the cache server
//!
//! Provides unified error handling using thiserror. Only malformed input is
//! an error; a missing key is a normal `found: false` answer.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A required query parameter is absent or empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The TTL is not a non-negative whole number of seconds
    #[error("Invalid duration '{0}': expected a non-negative integer number of seconds")]
    InvalidDuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The query string could not be decoded
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),
}

impl CacheError {
    /// HTTP status for this error.
    ///
    /// Every variant is a client input error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::MissingParameter(_)
            | CacheError::InvalidDuration(_)
            | CacheError::InvalidRequest(_)
            | CacheError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected request");
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
