//! Reclaim Task
//!
//! Optional background task that periodically removes expired entries.
//! Disabled by default so that reclamation stays client-triggered; see
//! `Config::reclaim_interval`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::KvStore;

/// Spawns a background task that periodically reclaims expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between reclaim passes. It acquires a write lock on the store only for
/// the duration of each pass.
///
/// # Arguments
/// * `store` - Shared reference to the store
/// * `interval_secs` - Interval in seconds between reclaim passes
/// * `ttl_secs` - TTL in seconds used to classify entries as expired
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(KvStore::new()));
/// let reclaim_handle = spawn_reclaim_task(store.clone(), 5, 60);
/// // Later, during shutdown:
/// reclaim_handle.abort();
/// ```
pub fn spawn_reclaim_task(
    store: Arc<RwLock<KvStore>>,
    interval_secs: u64,
    ttl_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting reclaim task with interval of {} seconds (TTL {}s)",
            interval_secs, ttl_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire write lock and remove expired entries
            let removed = {
                let mut store_guard = store.write().await;
                store_guard.reclaim(ttl_secs)
            };

            // Log reclaim statistics
            if !removed.is_empty() {
                info!("Reclaim pass: removed {} expired entries", removed.len());
            } else {
                debug!("Reclaim pass: no expired entries found");
            }
        }
    })
}
