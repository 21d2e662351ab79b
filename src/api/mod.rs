//! API Module
//!
//! HTTP handlers and routing for the store's REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value under a key
//! - `GET /get/:key` - Retrieve a value with its age and status
//! - `DELETE /del/:key` - Delete a key
//! - `GET /keys` - List all keys
//! - `GET /report` - Memory usage report
//! - `POST /reclaim` - Remove expired entries
//! - `PUT /cart/item` - Store an item in the cart tier
//! - `GET /cart` - List cart contents
//! - `POST /checkout` - Drain the cart into a new order
//! - `GET /orders` - List past orders
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
