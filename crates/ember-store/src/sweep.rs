//! Background retention sweep.
//!
//! Spawns a tokio task that periodically evicts expired drops through the
//! vault, so ciphertext leaves memory and disk within one interval of its
//! expiry even if nobody touches the id again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::vault::DropVault;

/// Spawn a task that sweeps the vault every `interval`.
///
/// The sweep runs concurrently with inserts, lookups, and consumes; the
/// store's own atomicity keeps them from interfering. The returned handle
/// can be aborted on shutdown; the task never exits on its own.
pub fn spawn_sweeper(vault: Arc<DropVault>, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let count = vault.sweep(Utc::now());
            if count > 0 {
                tracing::info!(count, "retention sweep evicted expired drops");
            } else {
                tracing::debug!("retention sweep found nothing expired");
            }
        }
    })
}
