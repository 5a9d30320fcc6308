//! Error types for the social graph service
//!
//! Provides unified error handling using thiserror. Three layers:
//! cache errors (never surfaced to callers), persistent store errors,
//! and the service error that maps onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Cache Error Enum ==
/// Failure of a cache operation. Callers degrade instead of failing.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache backend could not serve the operation
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// A cached snapshot could not be encoded or decoded
    #[error("Cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Store Error Enum ==
/// Failure of the durable store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Username uniqueness violated
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Row could not be mapped onto a domain value
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

// == Service Error Enum ==
/// Error returned by graph, content and timeline operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or malformed input; no store access was attempted
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The acting user identifier was not supplied
    #[error("X-User-ID header is required")]
    MissingIdentity,

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistent store failure
    #[error("Storage failure: {0}")]
    Storage(#[source] StoreError),

    /// A remote collaborator was unreachable or answered with a failure
    #[error("Downstream failure: {0}")]
    Downstream(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken(name) => {
                ServiceError::Conflict(format!("Username '{}' is already taken", name))
            }
            other => ServiceError::Storage(other),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::MissingIdentity => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServiceError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ServiceError::Storage(err) => {
                error!(error = %err, "Persistent store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage failure".to_string(),
                )
            }
            ServiceError::Downstream(msg) => {
                error!(error = %msg, "Downstream collaborator failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Downstream service failure".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
