//! Per-property async locks for serialized booking writes

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per property id, created on first use.
///
/// Entries nobody holds or waits on are pruned on the next acquire.
#[derive(Debug, Clone, Default)]
pub struct BookingLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl BookingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `property_id`. Released on drop.
    pub async fn acquire(&self, property_id: &str) -> OwnedMutexGuard<()> {
        // The map's own reference is the only one left once every guard and
        // waiter is gone.
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        let lock = self.locks.entry(property_id.to_string()).or_default().clone();
        lock.lock_owned().await
    }

    /// Number of properties with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
