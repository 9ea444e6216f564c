//! Error types for the guard engine and its HTTP surface
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Guard Error Enum ==
/// Unified error type for the guard engine.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A required setting is missing; the engine cannot be built
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The storage backend failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// The stored blob is not a valid item collection
    #[error("Decode error: {0}")]
    Decode(String),

    /// The item collection could not be serialized
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = match &self {
            GuardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GuardError::Storage(_) | GuardError::Decode(_) => StatusCode::SERVICE_UNAVAILABLE,
            GuardError::Configuration(_) | GuardError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the guard engine.
pub type Result<T> = std::result::Result<T, GuardError>;
