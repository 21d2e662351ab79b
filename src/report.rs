//! Accounting Module
//!
//! Derives read-only memory usage reports over a store: size per key,
//! totals and which keys garbage collection would remove. A report is a
//! pure projection; computing one never mutates the store and never
//! triggers reclamation.

use serde::Serialize;
use tracing::warn;

use crate::store::{age_secs_rounded, codec, current_timestamp_ms, EntryStatus, KvStore};

// == Key Usage ==
/// Memory accounting row for a single key.
#[derive(Debug, Clone, Serialize)]
pub struct KeyUsage {
    /// The entry's key
    pub key: String,
    /// Size in bytes of the document's canonical serialization
    pub size_bytes: usize,
    /// Status as of the report's clock snapshot
    pub status: EntryStatus,
    /// Age in seconds, tenth-of-a-second resolution (display figure only;
    /// status and reclaimability are judged on the raw millisecond age)
    pub age_secs: f64,
}

// == Usage Report ==
/// Memory accounting report over a store's current entries.
///
/// Expired-but-present entries still appear in the rows and count toward
/// the totals: expiry and removal are distinct events, and until a
/// reclaim runs the memory is still occupied.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    /// One row per present key, in the same order `KvStore::keys` returns
    pub per_key: Vec<KeyUsage>,
    /// Sum of `size_bytes` over all rows
    pub total_bytes: usize,
    /// Number of present keys
    pub total_keys: usize,
    /// Keys a reclaim with the same TTL would remove
    pub reclaimable_keys: Vec<String>,
}

// == Report ==
/// Builds a usage report for a store against a TTL in seconds.
///
/// Every row is judged against one clock snapshot captured when the call
/// starts, mirroring the reclaim scan, so a report and a reclaim taken
/// back to back cannot disagree about which entries are garbage.
///
/// An entry whose document fails to re-encode is reported with size zero
/// and logged; it still shows up in the rows and, when old enough, in
/// `reclaimable_keys`. Accounting trouble never shields an entry from
/// collection. Since `set` refuses documents the codec rejects, this path
/// would mean the codec and store have stopped agreeing.
pub fn report(store: &KvStore, ttl_secs: u64) -> UsageReport {
    let now = current_timestamp_ms();

    let mut per_key = Vec::with_capacity(store.len());
    let mut total_bytes = 0;
    let mut reclaimable_keys = Vec::new();

    for (key, entry) in store.entries() {
        let size_bytes = match codec::encoded_size(&entry.value) {
            Ok(size) => size,
            Err(err) => {
                warn!("Failed to measure entry '{}': {}", key, err);
                0
            }
        };
        total_bytes += size_bytes;

        let status = entry.status_at(now, ttl_secs);
        if status == EntryStatus::Expired {
            reclaimable_keys.push(key.to_string());
        }

        per_key.push(KeyUsage {
            key: key.to_string(),
            size_bytes,
            status,
            age_secs: age_secs_rounded(entry.age_ms_at(now)),
        });
    }

    let total_keys = per_key.len();

    UsageReport {
        per_key,
        total_bytes,
        total_keys,
        reclaimable_keys,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_store() -> KvStore {
        let mut store = KvStore::new();
        store.set("A".to_string(), json!({"x": 1})).unwrap();
        store
            .set("B".to_string(), json!({"y": [1, 2, 3]}))
            .unwrap();
        store
    }

    #[test]
    fn test_report_empty_store() {
        let store = KvStore::new();
        let report = report(&store, 60);

        assert!(report.per_key.is_empty());
        assert_eq!(report.total_bytes, 0);
        assert_eq!(report.total_keys, 0);
        assert!(report.reclaimable_keys.is_empty());
    }

    #[test]
    fn test_report_totals_match_codec() {
        let store = sample_store();
        let report = report(&store, 60);

        let expected: usize = store
            .entries()
            .map(|(_, entry)| codec::encoded_size(&entry.value).unwrap())
            .sum();

        assert_eq!(report.total_keys, 2);
        assert_eq!(report.total_bytes, expected);
        for row in &report.per_key {
            let (value, _) = store.get(&row.key).unwrap();
            assert_eq!(row.size_bytes, codec::encoded_size(&value).unwrap());
        }
    }

    #[test]
    fn test_report_row_order_matches_keys() {
        let mut store = KvStore::new();
        for i in 0..8 {
            store.set(format!("key{}", i), json!(i)).unwrap();
        }

        let report = report(&store, 60);
        let row_keys: Vec<String> = report.per_key.iter().map(|row| row.key.clone()).collect();
        assert_eq!(row_keys, store.keys());
    }

    #[test]
    fn test_report_marks_aged_entries() {
        let mut store = sample_store();
        store.age_entry("A", 61);

        let report = report(&store, 60);

        let row_a = report.per_key.iter().find(|row| row.key == "A").unwrap();
        let row_b = report.per_key.iter().find(|row| row.key == "B").unwrap();
        assert_eq!(row_a.status, EntryStatus::Expired);
        assert!(row_a.age_secs >= 61.0);
        assert_eq!(row_b.status, EntryStatus::Active);

        assert_eq!(report.reclaimable_keys, vec!["A".to_string()]);
    }

    #[test]
    fn test_expired_entries_still_count_toward_totals() {
        let mut store = sample_store();
        store.age_entry("A", 61);
        store.age_entry("B", 61);

        let report = report(&store, 60);

        assert_eq!(report.total_keys, 2);
        assert!(report.total_bytes > 0);
        assert_eq!(report.reclaimable_keys.len(), 2);
    }

    #[test]
    fn test_report_is_read_only() {
        let mut store = sample_store();
        store.age_entry("A", 61);

        let before = store.len();
        let _ = report(&store, 60);

        assert_eq!(store.len(), before);
        assert!(store.get("A").is_some(), "report must not evict");
    }

    #[test]
    fn test_report_agrees_with_reclaim() {
        let mut store = sample_store();
        store.set("C".to_string(), json!("fresh")).unwrap();
        store.age_entry("A", 120);
        store.age_entry("B", 90);

        let mut flagged = report(&store, 60).reclaimable_keys;
        let mut removed = store.reclaim(60);
        flagged.sort();
        removed.sort();

        assert_eq!(flagged, removed);
    }

    #[test]
    fn test_report_twice_is_stable() {
        let mut store = sample_store();
        store.age_entry("A", 61);

        let first = report(&store, 60);
        let second = report(&store, 60);

        assert_eq!(first.total_bytes, second.total_bytes);
        assert_eq!(first.total_keys, second.total_keys);
        assert_eq!(first.reclaimable_keys, second.reclaimable_keys);
        for (row_a, row_b) in first.per_key.iter().zip(second.per_key.iter()) {
            assert_eq!(row_a.key, row_b.key);
            assert_eq!(row_a.size_bytes, row_b.size_bytes);
            assert_eq!(row_a.status, row_b.status);
        }
    }

    #[test]
    fn test_report_serializes_for_rendering() {
        let store = sample_store();
        let json = serde_json::to_value(report(&store, 60)).unwrap();

        assert!(json.get("per_key").is_some());
        assert!(json.get("total_bytes").is_some());
        assert!(json.get("total_keys").is_some());
        assert!(json.get("reclaimable_keys").is_some());
        assert!(json["per_key"][0].get("status").is_some());
    }
}
