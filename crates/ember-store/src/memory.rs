use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use ember_types::DropId;

use crate::record::DropRecord;
use crate::traits::DropStore;

/// In-memory, HashMap-based drop store.
///
/// The production backend: drops are ephemeral by design, so nothing
/// survives a process restart. All records are held behind a `RwLock`;
/// `consume` is a plain write-lock `remove`, which is the atomic
/// check-and-remove the burn-after-read contract requires.
pub struct MemoryDropStore {
    drops: RwLock<HashMap<DropId, DropRecord>>,
}

impl MemoryDropStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            drops: RwLock::new(HashMap::new()),
        }
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.drops.write().expect("lock poisoned").clear();
    }
}

impl Default for MemoryDropStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DropStore for MemoryDropStore {
    fn insert(&self, record: DropRecord) -> DropId {
        let mut map = self.drops.write().expect("lock poisoned");
        loop {
            let id = DropId::generate();
            if let Entry::Vacant(entry) = map.entry(id) {
                entry.insert(record);
                return id;
            }
        }
    }

    fn lookup(&self, id: &DropId) -> Option<DropRecord> {
        let map = self.drops.read().expect("lock poisoned");
        map.get(id).cloned()
    }

    fn consume(&self, id: &DropId) -> Option<DropRecord> {
        let mut map = self.drops.write().expect("lock poisoned");
        map.remove(id)
    }

    fn delete(&self, id: &DropId) -> bool {
        let mut map = self.drops.write().expect("lock poisoned");
        map.remove(id).is_some()
    }

    fn evict_expired(&self, now: DateTime<Utc>) -> Vec<(DropId, DropRecord)> {
        let mut map = self.drops.write().expect("lock poisoned");
        let expired: Vec<DropId> = map
            .iter()
            .filter(|(_, record)| matches!(record.expires_at, Some(at) if at <= now))
            .map(|(id, _)| *id)
            .collect();
        expired
            .into_iter()
            .filter_map(|id| map.remove(&id).map(|record| (id, record)))
            .collect()
    }

    fn len(&self) -> usize {
        self.drops.read().expect("lock poisoned").len()
    }
}

impl std::fmt::Debug for MemoryDropStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDropStore")
            .field("drop_count", &self.len())
            .finish()
    }
}
