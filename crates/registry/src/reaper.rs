use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::registry::TableRegistry;

/// Spawns a background task that sweeps the registry on `interval`,
/// stopping and removing any table that has sat `Waiting` with no seated
/// players for `ttl` (spec §4.5's reaper policy). Dropping the returned
/// handle does not stop the sweep; call `.abort()` on it to do so.
pub fn spawn_reaper(registry: Arc<TableRegistry>, interval: Duration, ttl: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            registry.reap_once(ttl).await;
        }
    })
}
