//! API Routes
//!
//! Configures the Axum router with all store and checkout endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cart_handler, cart_set_handler, checkout_handler, delete_handler, get_handler, health_handler,
    keys_handler, orders_handler, reclaim_handler, report_handler, set_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value under a key
/// - `GET /get/:key` - Retrieve a value with its age and status
/// - `DELETE /del/:key` - Delete a key
/// - `GET /keys` - List all keys
/// - `GET /report` - Memory usage report
/// - `POST /reclaim` - Remove expired entries (optional `?ttl=` override)
/// - `PUT /cart/item` - Store an item in the cart tier
/// - `GET /cart` - List cart contents
/// - `POST /checkout` - Drain the cart into a new order
/// - `GET /orders` - List past orders, most recent first
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/keys", get(keys_handler))
        .route("/report", get(report_handler))
        .route("/reclaim", post(reclaim_handler))
        .route("/cart/item", put(cart_set_handler))
        .route("/cart", get(cart_handler))
        .route("/checkout", post(checkout_handler))
        .route("/orders", get(orders_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
