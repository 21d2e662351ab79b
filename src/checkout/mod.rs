//! Checkout Module
//!
//! Two-tier demo flow: an ephemeral cart (a plain store instance) drained
//! into a durable append-only order history in one atomic move-and-clear
//! operation.

mod drain;
mod order;

pub use drain::{drain, price_total};
pub use order::{Order, OrderLog};
