//! # Headers Pool
//!
//! Shard and metachain headers awaiting processing, indexed by hash and by
//! (shard, nonce) so that forks at the same height stay visible.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::{Hash, HeaderHandler, ShardId};

use super::errors::PoolError;

#[derive(Default)]
struct Inner {
    by_hash: HashMap<Hash, Arc<dyn HeaderHandler>>,
    by_nonce: HashMap<(ShardId, u64), Vec<Hash>>,
}

/// Pool of received headers.
pub struct HeadersPool {
    capacity: usize,
    inner: RwLock<Inner>,
}

impl std::fmt::Debug for HeadersPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadersPool")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

impl HeadersPool {
    /// Creates an empty pool.
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::InvalidCapacity("headers"));
        }
        Ok(Self {
            capacity,
            inner: RwLock::new(Inner::default()),
        })
    }

    /// Adds a header. Returns `Ok(false)` for a known hash.
    pub fn add_header(&self, hash: Hash, header: Arc<dyn HeaderHandler>) -> Result<bool, PoolError> {
        let mut inner = self.inner.write();
        if inner.by_hash.contains_key(&hash) {
            return Ok(false);
        }
        if inner.by_hash.len() >= self.capacity {
            return Err(PoolError::PoolFull {
                pool: "headers",
                capacity: self.capacity,
            });
        }
        inner
            .by_nonce
            .entry((header.shard_id(), header.nonce()))
            .or_default()
            .push(hash.clone());
        inner.by_hash.insert(hash, header);
        Ok(true)
    }

    /// Header by hash.
    pub fn get_header_by_hash(&self, hash: &[u8]) -> Option<Arc<dyn HeaderHandler>> {
        self.inner.read().by_hash.get(hash).cloned()
    }

    /// Headers of `shard_id` at `nonce`, with their hashes.
    pub fn get_headers_by_nonce_and_shard_id(
        &self,
        nonce: u64,
        shard_id: ShardId,
    ) -> Vec<(Hash, Arc<dyn HeaderHandler>)> {
        let inner = self.inner.read();
        inner
            .by_nonce
            .get(&(shard_id, nonce))
            .map(|hashes| {
                hashes
                    .iter()
                    .filter_map(|h| inner.by_hash.get(h).map(|hdr| (h.clone(), Arc::clone(hdr))))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes a header by hash.
    pub fn remove_header_by_hash(&self, hash: &[u8]) -> bool {
        let mut inner = self.inner.write();
        let Some(header) = inner.by_hash.remove(hash) else {
            return false;
        };
        let key = (header.shard_id(), header.nonce());
        if let Some(hashes) = inner.by_nonce.get_mut(&key) {
            hashes.retain(|h| h.as_slice() != hash);
            if hashes.is_empty() {
                inner.by_nonce.remove(&key);
            }
        }
        true
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.inner.read().by_hash.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
