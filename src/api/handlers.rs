//! API Handlers
//!
//! HTTP request handlers for each store endpoint. Handlers translate
//! between the wire DTOs in `models` and the in-memory `KvStore`,
//! `UsageReport`, and checkout types.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::checkout::{drain, price_total, Order, OrderLog};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{
    CartItem, CartResponse, DeleteResponse, GetResponse, HealthResponse, KeysResponse,
    OrdersResponse, ReclaimParams, ReclaimResponse, SetRequest, SetResponse,
};
use crate::report::{report, UsageReport};
use crate::store::KvStore;

// == Application State ==

/// Shared application state passed to all handlers.
///
/// The primary store and the cart are two independent `KvStore`
/// instances behind their own locks, so cart traffic never contends
/// with the main store. Orders live in an append-only log.
#[derive(Clone)]
pub struct AppState {
    /// Primary key-value store
    pub store: Arc<RwLock<KvStore>>,
    /// Cart tier, drained on checkout
    pub cart: Arc<RwLock<KvStore>>,
    /// Append-only order history
    pub orders: Arc<RwLock<OrderLog>>,
    /// TTL in seconds applied by reports and default reclaims
    pub ttl_secs: u64,
}

impl AppState {
    /// Creates application state around an existing store.
    ///
    /// The cart and the order log start empty.
    pub fn new(store: KvStore, ttl_secs: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            cart: Arc::new(RwLock::new(KvStore::new())),
            orders: Arc::new(RwLock::new(OrderLog::new())),
            ttl_secs,
        }
    }

    /// Creates application state from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(KvStore::new(), config.ttl_secs)
    }
}

// == Store Handlers ==

/// Handler for PUT /set
///
/// Stores a JSON value under a key. Overwriting an existing key
/// restarts its expiry clock.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    // Acquire write lock and set the value
    let mut store = state.store.write().await;
    store.set(req.key.clone(), req.value)?;

    debug!(key = %req.key, "Stored value");
    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value together with its age and expiry status. Expired
/// entries are still returned; nothing is removed until a reclaim runs.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Reads never mutate the store, a read lock is enough
    let store = state.store.read().await;

    match store.get(&key) {
        Some((value, age_ms)) => Ok(Json(GetResponse::new(key, value, age_ms, state.ttl_secs))),
        None => Err(StoreError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Removes a key if present. Deleting an absent key is not an error;
/// the response reports whether anything was removed.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    // Acquire write lock
    let mut store = state.store.write().await;
    let deleted = store.delete(&key);

    debug!(key = %key, deleted, "Delete request");
    Ok(Json(DeleteResponse::new(key, deleted)))
}

/// Handler for GET /keys
///
/// Lists every stored key, expired ones included.
pub async fn keys_handler(State(state): State<AppState>) -> Result<Json<KeysResponse>> {
    let store = state.store.read().await;
    Ok(Json(KeysResponse::new(store.keys())))
}

/// Handler for GET /report
///
/// Returns the memory usage report: one row per key with its encoded
/// size, expiry status, and age, plus totals and reclaimable keys. The
/// report is a pure read computed against a single timestamp.
pub async fn report_handler(State(state): State<AppState>) -> Result<Json<UsageReport>> {
    let store = state.store.read().await;
    Ok(Json(report(&store, state.ttl_secs)))
}

/// Handler for POST /reclaim
///
/// Removes every expired entry from the store. An optional `ttl` query
/// parameter overrides the configured TTL for this scan only.
pub async fn reclaim_handler(
    State(state): State<AppState>,
    Query(params): Query<ReclaimParams>,
) -> Result<Json<ReclaimResponse>> {
    let ttl_secs = params.ttl.unwrap_or(state.ttl_secs);

    // Acquire write lock for the scan-and-remove pass
    let mut store = state.store.write().await;
    let removed = store.reclaim(ttl_secs);

    if !removed.is_empty() {
        info!(count = removed.len(), ttl_secs, "Reclaimed expired entries");
    }
    Ok(Json(ReclaimResponse::new(removed)))
}

// == Checkout Handlers ==

/// Handler for PUT /cart/item
///
/// Stores a JSON value in the cart tier. The cart accepts the same
/// requests as the main store but lives in its own `KvStore`, so
/// checkout can drain it without touching other data.
pub async fn cart_set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let mut cart = state.cart.write().await;
    cart.set(req.key.clone(), req.value)?;

    debug!(key = %req.key, "Added cart item");
    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /cart
///
/// Lists the current cart contents.
pub async fn cart_handler(State(state): State<AppState>) -> Result<Json<CartResponse>> {
    let cart = state.cart.read().await;

    let items: Vec<CartItem> = cart
        .entries()
        .map(|(key, entry)| CartItem {
            key: key.to_string(),
            value: entry.value.clone(),
        })
        .collect();

    Ok(Json(CartResponse::new(items)))
}

/// Handler for POST /checkout
///
/// Drains the cart into a new order. Write locks on the cart and the
/// order log are held for the whole drain, so no cart mutation can
/// interleave with checkout. Locks are always taken cart first, then
/// orders.
pub async fn checkout_handler(State(state): State<AppState>) -> Result<Json<Order>> {
    let mut cart = state.cart.write().await;
    let mut orders = state.orders.write().await;

    match drain(&mut cart, &mut orders, price_total) {
        Some(order) => {
            info!(order_id = %order.order_id, total = order.total, "Checkout complete");
            Ok(Json(order))
        }
        None => Err(StoreError::EmptyCart),
    }
}

/// Handler for GET /orders
///
/// Lists past orders, most recent first.
pub async fn orders_handler(State(state): State<AppState>) -> Result<Json<OrdersResponse>> {
    let orders = state.orders.read().await;
    let orders: Vec<Order> = orders.list_reversed().cloned().collect();
    Ok(Json(OrdersResponse::new(orders)))
}

// == Health Handler ==

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
