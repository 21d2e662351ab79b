//! Store Entry Module
//!
//! Defines the structure for individual store entries and the age/status
//! predicates derived from them.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;

// == Store Entry ==
/// Represents a single stored document with its write timestamp.
///
/// An entry carries no expiry state of its own: whether it is active or
/// expired is always recomputed from its age and the TTL the caller is
/// working with, so status can never go stale while the clock advances.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored document
    pub value: Value,
    /// Write timestamp (Unix milliseconds), stamped by the store
    pub created_at: u64,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
        }
    }

    // == Age ==
    /// Returns the entry's age in milliseconds relative to `now_ms`.
    ///
    /// Saturates to zero if `now_ms` is earlier than the write timestamp,
    /// which can happen when the system clock is adjusted backwards.
    pub fn age_ms_at(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Expiry ==
    /// Checks whether the entry has outlived `ttl_secs` as of `now_ms`.
    ///
    /// Boundary condition: an entry is expired only once its age strictly
    /// exceeds the TTL. An entry whose age equals the TTL exactly is still
    /// active.
    ///
    /// The millisecond threshold saturates, so a TTL too large to express
    /// in milliseconds behaves as infinite instead of wrapping around.
    ///
    /// # Arguments
    /// * `now_ms` - Timestamp to evaluate against (one snapshot per scan)
    /// * `ttl_secs` - TTL in seconds
    pub fn is_expired_at(&self, now_ms: u64, ttl_secs: u64) -> bool {
        self.age_ms_at(now_ms) > ttl_secs.saturating_mul(1000)
    }

    /// Returns the entry's status as of `now_ms` against `ttl_secs`.
    pub fn status_at(&self, now_ms: u64, ttl_secs: u64) -> EntryStatus {
        EntryStatus::from_age(self.age_ms_at(now_ms), ttl_secs)
    }
}

// == Entry Status ==
/// Lifecycle status of an entry, derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Age is within the TTL
    Active,
    /// Age strictly exceeds the TTL; the entry remains present until reclaimed
    Expired,
}

impl EntryStatus {
    /// Derives a status from an age in milliseconds and a TTL in seconds.
    pub fn from_age(age_ms: u64, ttl_secs: u64) -> Self {
        if age_ms > ttl_secs.saturating_mul(1000) {
            EntryStatus::Expired
        } else {
            EntryStatus::Active
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// Converts a millisecond age to seconds at tenth-of-a-second resolution.
///
/// Display figure only: expiry decisions always use the raw millisecond
/// age, never the rounded one.
pub fn age_secs_rounded(age_ms: u64) -> f64 {
    (age_ms as f64 / 100.0).round() / 10.0
}
