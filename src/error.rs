//! Error types for the HTTP surface
//!
//! The cache access layer itself never returns errors; these variants exist
//! only for request validation and lock signaling at the service edge.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Api Error Enum ==
/// Errors the HTTP handlers can surface to clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not present in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Lock already held by another owner
    #[error("Lock held: {0}")]
    LockHeld(String),

    /// Lock release refused: wrong owner or lease already expired
    #[error("Lock not owned: {0}")]
    LockNotOwned(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::LockHeld(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::LockNotOwned(msg) => (StatusCode::CONFLICT, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
