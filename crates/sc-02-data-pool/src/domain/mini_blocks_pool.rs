//! # Mini-Blocks Pool

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::{Hash, MiniBlock};

use super::errors::PoolError;

/// Mini-blocks keyed by hash.
#[derive(Debug)]
pub struct MiniBlocksPool {
    capacity: usize,
    by_hash: RwLock<HashMap<Hash, MiniBlock>>,
}

impl MiniBlocksPool {
    /// Creates an empty pool.
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::InvalidCapacity("miniblocks"));
        }
        Ok(Self {
            capacity,
            by_hash: RwLock::new(HashMap::new()),
        })
    }

    /// Adds a mini-block unless its hash is known. Returns whether it was added.
    pub fn has_or_add(&self, hash: Hash, mini_block: MiniBlock) -> Result<bool, PoolError> {
        let mut by_hash = self.by_hash.write();
        if by_hash.contains_key(&hash) {
            return Ok(false);
        }
        if by_hash.len() >= self.capacity {
            return Err(PoolError::PoolFull {
                pool: "miniblocks",
                capacity: self.capacity,
            });
        }
        by_hash.insert(hash, mini_block);
        Ok(true)
    }

    /// Mini-block by hash.
    pub fn get(&self, hash: &[u8]) -> Option<MiniBlock> {
        self.by_hash.read().get(hash).cloned()
    }

    /// Number of mini-blocks.
    pub fn len(&self) -> usize {
        self.by_hash.read().len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
