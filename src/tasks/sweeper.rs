//! TTL Sweeper Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Reads already drop expired entries they run into; the sweeper only reclaims
//! memory held by entries nobody asks for again. One task per cache.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Cache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between passes.
/// Each pass holds the cache's write lock only while purging and never
/// across an await point.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which should be aborted on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Cache::new(1000, EvictionPolicyKind::Lru)?);
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper<K, V>(cache: Arc<Cache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            policy = cache.policy_name(),
            "Starting TTL sweeper"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
