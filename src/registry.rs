//! Concurrency-safe component registry.
//!
//! [`ComponentRegistry`] is a multimap from identity key to the set of
//! distinct [`ComponentEntry`] occurrences seen for that key. Scanner
//! workers on different files feed it concurrently; the map is sharded by
//! key hash so puts for unrelated keys proceed in parallel while mutation
//! of any single key stays serialized under its shard lock.
//!
//! The registry is an explicit object handed to collaborators by
//! reference. Nothing in this crate holds registry state in a global.

use crate::model::ComponentEntry;
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};
use xxhash_rust::xxh3::xxh3_64;

/// Shard count for the key-hash partitioned map.
const DEFAULT_SHARDS: usize = 16;

type Shard = Mutex<HashMap<String, IndexSet<ComponentEntry>>>;

/// Multimap of identity key to distinct component occurrences.
pub struct ComponentRegistry {
    shards: Vec<Shard>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        let shards = (0..DEFAULT_SHARDS).map(|_| Shard::default()).collect();
        Self { shards }
    }

    fn shard_for(&self, key: &str) -> &Shard {
        let index = (xxh3_64(key.as_bytes()) as usize) % self.shards.len();
        &self.shards[index]
    }

    /// Record an occurrence under `key`.
    ///
    /// The check-then-insert is atomic per key: if the key's group already
    /// holds an entry equal to this one (same identity and digest), the put
    /// is a no-op. Returns whether the entry was newly inserted.
    pub fn put(&self, key: &str, entry: ComponentEntry) -> bool {
        let mut shard = self
            .shard_for(key)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        shard.entry(key.to_owned()).or_default().insert(entry)
    }

    /// Number of distinct identity keys recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Immutable point-in-time view of all groups.
    ///
    /// Groups come out keyed in sorted order with entries sorted by
    /// location, so downstream reporting is deterministic regardless of
    /// scan scheduling.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut groups = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock().unwrap_or_else(PoisonError::into_inner);
            for (key, entries) in shard.iter() {
                let mut entries: Vec<ComponentEntry> = entries.iter().cloned().collect();
                entries.sort_by(|a, b| a.location.cmp(&b.location));
                groups.insert(key.clone(), entries);
            }
        }
        RegistrySnapshot { groups }
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable view of registry contents at snapshot time.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    groups: BTreeMap<String, Vec<ComponentEntry>>,
}

impl RegistrySnapshot {
    /// All groups in key order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[ComponentEntry])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The group for one key, if any.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&[ComponentEntry]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Groups holding more than one distinct occurrence. Each of these is
    /// a duplicate finding.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = (&str, &[ComponentEntry])> {
        self.groups().filter(|(_, entries)| entries.len() > 1)
    }

    /// Number of distinct identity keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total occurrences across all groups.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
