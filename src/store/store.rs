//! Key-Value Store Module
//!
//! Main store engine: a key-to-entry map with write timestamps, lazy TTL
//! expiry and on-demand reclamation of expired entries.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::store::{codec, current_timestamp_ms, Entry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == KV Store ==
/// In-memory key-value store with TTL-based garbage collection.
///
/// The store itself never decides that an entry is gone: `get` returns
/// expired-but-present entries along with their age, and only an explicit
/// [`reclaim`](KvStore::reclaim) removes them. Callers construct a store
/// instance and pass it around explicitly; there is no process-wide
/// singleton.
///
/// All mutating operations take `&mut self` and run to completion, so a
/// single-writer caller gets all-or-nothing semantics for free. Behind a
/// shared front end the instance is wrapped in one `RwLock` (see the api
/// module), which serializes mutations and keeps the reclaim scan's
/// single-snapshot guarantee intact.
#[derive(Debug, Default)]
pub struct KvStore {
    /// Key-to-entry storage; sole owner of all entries
    entries: HashMap<String, Entry>,
}

impl KvStore {
    // == Constructor ==
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Set ==
    /// Stores a document under a key.
    ///
    /// If the key already exists its entry is overwritten entirely and the
    /// expiry clock restarts: age is always measured from the most recent
    /// write. Overwriting is not an error.
    ///
    /// The document is run through the codec before anything is inserted,
    /// so a value that cannot be encoded (or whose canonical form exceeds
    /// [`MAX_VALUE_SIZE`]) is rejected without leaving a partial entry
    /// behind.
    ///
    /// # Arguments
    /// * `key` - The key to store under; must be non-empty
    /// * `value` - The document to store
    pub fn set(&mut self, key: String, value: Value) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidRequest(
                "Key cannot be empty".to_string(),
            ));
        }

        if key.len() > MAX_KEY_LENGTH {
            return Err(StoreError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        // Measure through the codec so validation and size accounting can
        // never disagree about what a document weighs.
        let encoded_size = codec::encoded_size(&value)?;
        if encoded_size > MAX_VALUE_SIZE {
            return Err(StoreError::InvalidRequest(format!(
                "Value exceeds maximum encoded size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        self.entries.insert(key, Entry::new(value));

        Ok(())
    }

    // == Get ==
    /// Retrieves a document and its current age in milliseconds.
    ///
    /// Read-only: no expiry check is applied and nothing is evicted. An
    /// expired-but-present entry comes back with its value and an age past
    /// the TTL; deciding what to do with it is the caller's business.
    /// Returns `None` only when the key is absent.
    pub fn get(&self, key: &str) -> Option<(Value, u64)> {
        let now = current_timestamp_ms();
        self.entries
            .get(key)
            .map(|entry| (entry.value.clone(), entry.age_ms_at(now)))
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether a removal occurred. Deleting an absent key is not
    /// an error; the call is idempotent.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Keys ==
    /// Returns a snapshot of the currently present keys.
    ///
    /// Iteration order is unspecified; it reflects neither insertion nor
    /// recency.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Entries ==
    /// Iterates over the current entries.
    ///
    /// Entries are handed out immutably; the store remains the only place
    /// that writes them.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    // == Reclaim ==
    /// Removes every entry older than `ttl_secs` and returns their keys.
    ///
    /// The whole scan is judged against one clock snapshot captured when
    /// the call starts, so two entries written at the same instant are
    /// always judged identically and no entry can flip from active to
    /// expired halfway through a single reclaim.
    ///
    /// Expiry is strict: an entry whose age equals the TTL exactly
    /// survives.
    pub fn reclaim(&mut self, ttl_secs: u64) -> Vec<String> {
        let now = current_timestamp_ms();

        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now, ttl_secs))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        expired_keys
    }

    // == Clear ==
    /// Removes every entry. Used by the checkout flow after draining.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Test Support ==
    /// Rewinds an entry's write timestamp by `by_secs`, ageing it
    /// artificially so TTL behavior is testable without real waiting.
    /// Returns whether the key existed.
    #[cfg(test)]
    pub(crate) fn age_entry(&mut self, key: &str, by_secs: u64) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.created_at = entry.created_at.saturating_sub(by_secs * 1000);
                true
            }
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_new() {
        let store = KvStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = KvStore::new();

        store.set("cliente_A".to_string(), json!({"x": 1})).unwrap();
        let (value, age_ms) = store.get("cliente_A").unwrap();

        assert_eq!(value, json!({"x": 1}));
        assert!(age_ms < 1_000, "fresh entry should have near-zero age");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = KvStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_get_is_read_only() {
        let mut store = KvStore::new();

        store.set("key1".to_string(), json!("v")).unwrap();
        store.age_entry("key1", 3_600);

        // Lazy expiry: an aged entry is still readable, with its real age,
        // and reading it does not evict it.
        let (value, age_ms) = store.get("key1").unwrap();
        assert_eq!(value, json!("v"));
        assert!(age_ms >= 3_600_000);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = KvStore::new();

        store.set("key1".to_string(), json!(1)).unwrap();
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_delete_idempotent() {
        let mut store = KvStore::new();

        assert!(!store.delete("nonexistent"));
        assert!(!store.delete("nonexistent"));
    }

    #[test]
    fn test_store_overwrite_replaces_value() {
        let mut store = KvStore::new();

        store.set("key1".to_string(), json!("first")).unwrap();
        store.set("key1".to_string(), json!("second")).unwrap();

        let (value, _) = store.get("key1").unwrap();
        assert_eq!(value, json!("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_clock() {
        let mut store = KvStore::new();

        store.set("key1".to_string(), json!("first")).unwrap();
        store.age_entry("key1", 3_600);
        store.set("key1".to_string(), json!("second")).unwrap();

        // Age restarts from the second write, not the first.
        let (value, age_ms) = store.get("key1").unwrap();
        assert_eq!(value, json!("second"));
        assert!(age_ms < 1_000);
    }

    #[test]
    fn test_store_rejects_empty_key() {
        let mut store = KvStore::new();

        let result = store.set(String::new(), json!(1));
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_rejects_key_too_long() {
        let mut store = KvStore::new();
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = store.set(long_key, json!(1));
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[test]
    fn test_store_rejects_value_too_large() {
        let mut store = KvStore::new();
        // Quoting pushes the encoded form just past the cap.
        let large_value = json!("x".repeat(MAX_VALUE_SIZE));

        let result = store.set("key".to_string(), large_value);
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_keys_snapshot() {
        let mut store = KvStore::new();

        store.set("a".to_string(), json!(1)).unwrap();
        store.set("b".to_string(), json!(2)).unwrap();

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_store_entries_iterates_all() {
        let mut store = KvStore::new();

        store.set("a".to_string(), json!(1)).unwrap();
        store.set("b".to_string(), json!(2)).unwrap();

        let mut seen: Vec<(&str, &Entry)> = store.entries().collect();
        seen.sort_by_key(|(key, _)| *key);

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "a");
        assert_eq!(seen[0].1.value, json!(1));
        assert_eq!(seen[1].0, "b");
        assert_eq!(seen[1].1.value, json!(2));
    }

    #[test]
    fn test_reclaim_removes_only_expired() {
        let mut store = KvStore::new();

        store.set("old".to_string(), json!(1)).unwrap();
        store.set("fresh".to_string(), json!(2)).unwrap();
        store.age_entry("old", 61);

        let removed = store.reclaim(60);

        assert_eq!(removed, vec!["old".to_string()]);
        assert_eq!(store.len(), 1);
        assert!(store.get("old").is_none());
        assert!(store.get("fresh").is_some());
    }

    #[test]
    fn test_reclaim_empty_store() {
        let mut store = KvStore::new();
        assert!(store.reclaim(60).is_empty());
    }

    #[test]
    fn test_reclaim_nothing_expired() {
        let mut store = KvStore::new();

        store.set("a".to_string(), json!(1)).unwrap();
        store.set("b".to_string(), json!(2)).unwrap();

        assert!(store.reclaim(60).is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reclaim_well_within_ttl_survives() {
        let mut store = KvStore::new();

        store.set("young".to_string(), json!(1)).unwrap();
        store.age_entry("young", 30);

        assert!(store.reclaim(60).is_empty());
        assert!(store.get("young").is_some());
    }

    #[test]
    fn test_reclaim_respects_parameter_over_default() {
        let mut store = KvStore::new();

        store.set("a".to_string(), json!(1)).unwrap();
        store.age_entry("a", 10);

        // Aged ten seconds: survives a 60s TTL, collected under a 5s one.
        assert!(store.reclaim(60).is_empty());
        let removed = store.reclaim(5);
        assert_eq!(removed, vec!["a".to_string()]);
    }

    #[test]
    fn test_reclaim_huge_ttl_collects_nothing() {
        let mut store = KvStore::new();

        store.set("fresh".to_string(), json!(1)).unwrap();
        store.set("older".to_string(), json!(2)).unwrap();
        store.age_entry("fresh", 1);
        store.age_entry("older", 3_600);

        // A TTL beyond u64's millisecond range acts as infinite; no age
        // can exceed a saturated threshold.
        assert!(store.reclaim(u64::MAX).is_empty());
        assert!(store.reclaim(u64::MAX / 1000 + 1).is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reclaim_two_key_scenario() {
        let mut store = KvStore::new();

        store.set("A".to_string(), json!({"x": 1})).unwrap();
        store.set("B".to_string(), json!({"y": [1, 2, 3]})).unwrap();
        assert_eq!(store.len(), 2);

        store.age_entry("A", 61);
        store.age_entry("B", 61);

        let mut removed = store.reclaim(60);
        removed.sort();
        assert_eq!(removed, vec!["A".to_string(), "B".to_string()]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = KvStore::new();

        store.set("a".to_string(), json!(1)).unwrap();
        store.set("b".to_string(), json!(2)).unwrap();

        store.clear();
        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }
}
