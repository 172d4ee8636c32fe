//! # Sharded Data Cache
//!
//! Transaction-like objects keyed by hash, partitioned by the
//! (sender shard, receiver shard) pair they travel on.
//!
//! ## Invariants
//!
//! - Adding a hash already present in the partition is a silent no-op
//! - A partition never holds more than `capacity` entries

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::{Hash, ShardId};
use tracing::trace;

use super::errors::PoolError;

/// Partition name for traffic from `sender` to `receiver`.
///
/// Intra-shard traffic uses the bare shard id.
pub fn shard_cache_identifier(sender: ShardId, receiver: ShardId) -> String {
    if sender == receiver {
        sender.to_string()
    } else {
        format!("{}_{}", sender, receiver)
    }
}

/// Hash-keyed store partitioned by cache identifier.
#[derive(Debug)]
pub struct ShardedDataCache<T> {
    name: &'static str,
    capacity: usize,
    partitions: RwLock<HashMap<String, HashMap<Hash, T>>>,
}

impl<T: Clone> ShardedDataCache<T> {
    /// Creates an empty cache holding up to `capacity` entries per partition.
    pub fn new(name: &'static str, capacity: usize) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::InvalidCapacity(name));
        }
        Ok(Self {
            name,
            capacity,
            partitions: RwLock::new(HashMap::new()),
        })
    }

    /// Inserts `value` under `hash`. Returns `Ok(false)` if it was already there.
    pub fn add_data(&self, hash: Hash, value: T, cache_id: &str) -> Result<bool, PoolError> {
        let mut partitions = self.partitions.write();
        let partition = partitions.entry(cache_id.to_string()).or_default();
        if partition.contains_key(&hash) {
            trace!(pool = self.name, cache_id, "duplicate ignored");
            return Ok(false);
        }
        if partition.len() >= self.capacity {
            return Err(PoolError::PoolFull {
                pool: self.name,
                capacity: self.capacity,
            });
        }
        partition.insert(hash, value);
        Ok(true)
    }

    /// Looks `hash` up in any partition.
    pub fn search_first_data(&self, hash: &[u8]) -> Option<T> {
        self.partitions
            .read()
            .values()
            .find_map(|p| p.get(hash).cloned())
    }

    /// Looks `hash` up in one partition.
    pub fn get(&self, hash: &[u8], cache_id: &str) -> Option<T> {
        self.partitions
            .read()
            .get(cache_id)
            .and_then(|p| p.get(hash).cloned())
    }

    /// Removes `hash` from one partition.
    pub fn remove_data(&self, hash: &[u8], cache_id: &str) -> Option<T> {
        self.partitions
            .write()
            .get_mut(cache_id)
            .and_then(|p| p.remove(hash))
    }

    /// Entries in one partition.
    pub fn len_of(&self, cache_id: &str) -> usize {
        self.partitions.read().get(cache_id).map_or(0, HashMap::len)
    }

    /// Entries across all partitions.
    pub fn len(&self) -> usize {
        self.partitions.read().values().map(HashMap::len).sum()
    }

    /// True when no partition holds anything.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
