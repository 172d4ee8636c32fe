//! # Trie Nodes Pool
//!
//! Bounded FIFO of raw trie nodes requested during state sync. When full,
//! the oldest node is evicted: sync re-requests anything it still misses.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use shared_types::Hash;

use super::errors::PoolError;

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<Hash, Vec<u8>>,
    order: VecDeque<Hash>,
}

/// Raw trie nodes keyed by hash.
#[derive(Debug)]
pub struct TrieNodesPool {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl TrieNodesPool {
    /// Creates an empty pool.
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::InvalidCapacity("trie nodes"));
        }
        Ok(Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// Stores the node's bytes. Returns `false` for a known hash.
    pub fn put(&self, hash: Hash, node: Vec<u8>) -> bool {
        let mut inner = self.inner.lock();
        if inner.nodes.contains_key(&hash) {
            return false;
        }
        if inner.nodes.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.nodes.remove(&oldest);
            }
        }
        inner.order.push_back(hash.clone());
        inner.nodes.insert(hash, node);
        true
    }

    /// Node bytes by hash.
    pub fn get(&self, hash: &[u8]) -> Option<Vec<u8>> {
        self.inner.lock().nodes.get(hash).cloned()
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.inner.lock().nodes.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
