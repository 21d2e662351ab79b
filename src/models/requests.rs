//! Request DTOs for the store API
//!
//! Defines the structure of incoming HTTP request bodies and query
//! parameters.

use serde::Deserialize;
use serde_json::Value;

use crate::store::MAX_KEY_LENGTH;

/// Request body for the SET operation (PUT /set) and for adding a cart
/// item (PUT /cart/item).
///
/// # Fields
/// - `key`: The key to store the document under
/// - `value`: An arbitrary JSON document (nested maps/sequences/scalars)
///
/// A body that is not valid JSON never gets this far: the extractor
/// rejects it at the boundary, so the store only ever sees parsed
/// documents.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The key
    pub key: String,
    /// The document to store
    pub value: Value,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Query parameters for the reclaim operation (POST /reclaim).
///
/// `ttl` overrides the configured TTL for this scan only; when omitted
/// the server reclaims with the same constant the report uses for status
/// display.
#[derive(Debug, Clone, Deserialize)]
pub struct ReclaimParams {
    /// Optional TTL override in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}
