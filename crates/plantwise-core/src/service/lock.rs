//! Per-plant locks serializing scene saves within one process

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i64, Arc<Mutex<()>>>;

/// One async mutex per plant id, created on first use and dropped once no
/// task holds or awaits it.
#[derive(Clone, Debug, Default)]
pub struct PlantLocks {
    locks: Arc<LockMap>,
}

impl PlantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `plant_id`. Released when the guard drops.
    pub async fn acquire(&self, plant_id: i64) -> PlantLockGuard {
        let lock = self.locks.entry(plant_id).or_default().clone();
        let guard = lock.lock_owned().await;
        PlantLockGuard {
            plant_id,
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    /// Drop the entry of `plant_id` unless a task still holds or awaits it.
    pub fn remove(&self, plant_id: i64) {
        release_idle(&self.locks, plant_id);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// The map's own reference is the only one left when nobody uses the lock.
fn release_idle(locks: &LockMap, plant_id: i64) {
    locks.remove_if(&plant_id, |_, lock| Arc::strong_count(lock) == 1);
}

/// Exclusive access to one plant
#[derive(Debug)]
pub struct PlantLockGuard {
    plant_id: i64,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PlantLockGuard {
    fn drop(&mut self) {
        // The guard holds a reference to the mutex, unlock before checking
        drop(self.guard.take());
        release_idle(&self.locks, self.plant_id);
    }
}
