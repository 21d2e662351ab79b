//! Order Module
//!
//! The durable tier of the two-tier demo flow: order documents and the
//! append-only log that holds them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

// == Order ==
/// A persisted order document, built once at drain time and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Generated unique identifier
    pub order_id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Snapshot of the cart's documents at drain time
    pub items: Vec<Value>,
    /// Order total, computed by the caller-supplied aggregator
    pub total: f64,
}

impl Order {
    // == Constructor ==
    /// Creates a new order with a fresh id and the current timestamp.
    pub fn new(items: Vec<Value>, total: f64) -> Self {
        Self {
            order_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            items,
            total,
        }
    }
}

// == Order Log ==
/// Append-only sequence of orders.
///
/// Orders can be appended and listed, nothing else: persisted history is
/// immutable, so there is no update or delete surface at all.
#[derive(Debug, Default)]
pub struct OrderLog {
    /// Orders in append order
    orders: Vec<Order>,
}

impl OrderLog {
    // == Constructor ==
    /// Creates a new empty order log.
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    // == Append ==
    /// Appends an order to the log.
    pub fn append(&mut self, order: Order) {
        self.orders.push(order);
    }

    // == List Reversed ==
    /// Iterates over the orders, most recent first.
    pub fn list_reversed(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().rev()
    }

    // == Length ==
    /// Returns the number of orders in the log.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    // == Is Empty ==
    /// Returns true if no order has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
