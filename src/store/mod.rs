//! Store Module
//!
//! Provides the in-memory key-value store with TTL expiry, lazy expiry
//! detection and on-demand reclamation, plus the canonical codec used for
//! size accounting.

pub mod codec;
mod entry;
mod store;


// Re-export public types
pub use entry::{age_secs_rounded, current_timestamp_ms, Entry, EntryStatus};
pub use store::KvStore;

// == Public Constants ==
/// Default TTL in seconds. Status display and reclamation both default to
/// this constant, so what the dashboard reports as expired and what
/// garbage collection removes always agree.
pub const DEFAULT_TTL_SECS: u64 = 60;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed encoded-value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
