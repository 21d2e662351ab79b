//! ramkv - An in-memory key-value store with TTL expiry
//!
//! Stores arbitrary JSON documents, accounts for their canonical encoded
//! size, and reclaims expired entries on demand. Includes a small two-tier
//! checkout flow built on top of the store.

pub mod api;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::KvStore;
pub use tasks::spawn_reclaim_task;
