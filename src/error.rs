//! Error types for the store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the store and its REST front end.
///
/// An absent key is not represented here for the core operations: `get`
/// returns `Option` and `delete` returns `bool`, and callers branch on
/// those. `NotFound` exists so the HTTP layer can translate an absent key
/// into a 404 response.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key not found (HTTP boundary translation of an absent key)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Document cannot be represented in the canonical serialization
    #[error("Value cannot be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    /// Checkout attempted on an empty cart
    #[error("Cart is empty, nothing to drain")]
    EmptyCart,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StoreError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::Encode(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            StoreError::EmptyCart => (StatusCode::CONFLICT, self.to_string()),
            StoreError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
