//! Age Cleanup Task
//!
//! Background task that periodically removes cache items older than a
//! configured age.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::CacheManager;

/// Spawns a background task that periodically removes old cache items.
///
/// The task sleeps for `cleanup_interval_secs` between runs and calls
/// [`CacheManager::cleanup_old_entries`] with `max_age_minutes`. Failed runs
/// are logged and the loop keeps going.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = CacheManager::in_memory(10);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60, 30.0);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    cache: CacheManager,
    cleanup_interval_secs: u64,
    max_age_minutes: f64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting age cleanup task every {} seconds, max age {} minutes",
            cleanup_interval_secs, max_age_minutes
        );

        loop {
            tokio::time::sleep(interval).await;

            match cache.cleanup_old_entries(max_age_minutes).await {
                Ok(0) => debug!("Age cleanup: no old items found"),
                Ok(removed) => info!("Age cleanup: removed {} old items", removed),
                Err(e) => error!("Age cleanup failed: {}", e),
            }
        }
    })
}
