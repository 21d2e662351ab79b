//! Drain Module
//!
//! The one-shot move-and-clear operation feeding the ephemeral cart into
//! the durable order log.

use serde_json::Value;

use crate::checkout::{Order, OrderLog};
use crate::store::KvStore;

// == Drain ==
/// Drains a cart store into the order log.
///
/// Captures the cart's current documents as the order's items, computes
/// the total with the caller-supplied aggregator, appends the resulting
/// order to the log and clears the cart. The whole operation runs under
/// one `&mut` borrow of each container, so observers never see a
/// half-moved state.
///
/// An empty cart short-circuits: no order is built, the log is untouched
/// and `None` is returned. A degenerate empty order never reaches the
/// history.
///
/// # Arguments
/// * `cart` - The ephemeral store to drain
/// * `log` - The durable order history
/// * `aggregate` - Computes the order total from the item documents
pub fn drain<F>(cart: &mut KvStore, log: &mut OrderLog, aggregate: F) -> Option<Order>
where
    F: FnOnce(&[Value]) -> f64,
{
    if cart.is_empty() {
        return None;
    }

    let items: Vec<Value> = cart
        .entries()
        .map(|(_, entry)| entry.value.clone())
        .collect();
    let total = aggregate(&items);

    let order = Order::new(items, total);
    log.append(order.clone());
    cart.clear();

    Some(order)
}

// == Price Total ==
/// Stock aggregator: sums each item's `price` times its `qty`.
///
/// A missing or non-numeric `price` contributes nothing; a missing `qty`
/// counts as one unit.
pub fn price_total(items: &[Value]) -> f64 {
    items
        .iter()
        .map(|item| {
            let price = item.get("price").and_then(Value::as_f64).unwrap_or(0.0);
            let qty = item.get("qty").and_then(Value::as_f64).unwrap_or(1.0);
            price * qty
        })
        .sum()
}
