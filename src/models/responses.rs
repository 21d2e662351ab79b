//! Response DTOs for the store API
//!
//! Defines the structure of outgoing HTTP response bodies. The accounting
//! report and the order document serialize as-is (see the report and
//! checkout modules); everything else is wrapped here.

use serde::Serialize;
use serde_json::Value;

use crate::checkout::Order;
use crate::store::{age_secs_rounded, EntryStatus};

/// Response body for the GET operation (GET /get/:key)
///
/// Present-but-expired entries come back with their value, their age and
/// `status = "expired"`: the store hands out what it has, the renderer
/// decides what to show.
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored document
    pub value: Value,
    /// Age in seconds, tenth-of-a-second resolution
    pub age_secs: f64,
    /// Status against the server's configured TTL
    pub status: EntryStatus,
}

impl GetResponse {
    /// Creates a new GetResponse, deriving status and display age from
    /// the raw millisecond age.
    pub fn new(key: impl Into<String>, value: Value, age_ms: u64, ttl_secs: u64) -> Self {
        Self {
            key: key.into(),
            value,
            age_secs: age_secs_rounded(age_ms),
            status: EntryStatus::from_age(age_ms, ttl_secs),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
///
/// Deleting an absent key is not an error; `deleted` reports whether a
/// removal actually occurred.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Outcome message
    pub message: String,
    /// The key the delete targeted
    pub key: String,
    /// Whether an entry was removed
    pub deleted: bool,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        let key = key.into();
        let message = if deleted {
            format!("Key '{}' deleted successfully", key)
        } else {
            format!("Key '{}' was not present", key)
        };
        Self {
            message,
            key,
            deleted,
        }
    }
}

/// Response body for the keys listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Currently present keys
    pub keys: Vec<String>,
    /// Number of keys
    pub count: usize,
}

impl KeysResponse {
    /// Creates a new KeysResponse
    pub fn new(keys: Vec<String>) -> Self {
        let count = keys.len();
        Self { keys, count }
    }
}

/// Response body for the reclaim operation (POST /reclaim)
#[derive(Debug, Clone, Serialize)]
pub struct ReclaimResponse {
    /// Keys removed by this scan
    pub removed: Vec<String>,
    /// Number of removed keys
    pub count: usize,
}

impl ReclaimResponse {
    /// Creates a new ReclaimResponse
    pub fn new(removed: Vec<String>) -> Self {
        let count = removed.len();
        Self { removed, count }
    }
}

/// A single cart entry as listed by GET /cart
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    /// The item's key in the cart store
    pub key: String,
    /// The item document
    pub value: Value,
}

/// Response body for the cart listing (GET /cart)
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    /// Current cart contents
    pub items: Vec<CartItem>,
    /// Number of items
    pub count: usize,
}

impl CartResponse {
    /// Creates a new CartResponse
    pub fn new(items: Vec<CartItem>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// Response body for the order history (GET /orders), most recent first
#[derive(Debug, Clone, Serialize)]
pub struct OrdersResponse {
    /// Persisted orders, newest to oldest
    pub orders: Vec<Order>,
    /// Number of orders
    pub count: usize,
}

impl OrdersResponse {
    /// Creates a new OrdersResponse
    pub fn new(orders: Vec<Order>) -> Self {
        let count = orders.len();
        Self { orders, count }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
