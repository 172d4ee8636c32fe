//! # Pools Holder
//!
//! Every shard-local pool the interceptors write into, built once per node.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared_types::{RewardTransaction, SmartContractResult, Transaction};

use crate::domain::{
    HeadersPool, MiniBlocksPool, PeerShardMapper, PoolError, ShardedDataCache, TrieNodesPool,
};

/// Pool capacities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolsConfig {
    /// Per-partition capacity of each transaction cache.
    pub tx_capacity: usize,
    /// Headers pool capacity.
    pub headers_capacity: usize,
    /// Mini-blocks pool capacity.
    pub mini_blocks_capacity: usize,
    /// Trie nodes pool capacity.
    pub trie_nodes_capacity: usize,
}

impl Default for PoolsConfig {
    fn default() -> Self {
        Self {
            tx_capacity: 100_000,
            headers_capacity: 1_000,
            mini_blocks_capacity: 30_000,
            trie_nodes_capacity: 50_000,
        }
    }
}

/// Shared handles to all pools.
#[derive(Debug, Clone)]
pub struct PoolsHolder {
    /// User transactions.
    pub transactions: Arc<ShardedDataCache<Transaction>>,
    /// Smart-contract results.
    pub unsigned_transactions: Arc<ShardedDataCache<SmartContractResult>>,
    /// Reward transactions.
    pub reward_transactions: Arc<ShardedDataCache<RewardTransaction>>,
    /// Shard and metachain headers.
    pub headers: Arc<HeadersPool>,
    /// Mini-blocks.
    pub mini_blocks: Arc<MiniBlocksPool>,
    /// Trie nodes.
    pub trie_nodes: Arc<TrieNodesPool>,
    /// Announced peer shards.
    pub peer_shard_mapper: Arc<PeerShardMapper>,
}

impl PoolsHolder {
    /// Builds every pool from `config`.
    pub fn new(config: &PoolsConfig) -> Result<Self, PoolError> {
        Ok(Self {
            transactions: Arc::new(ShardedDataCache::new("transactions", config.tx_capacity)?),
            unsigned_transactions: Arc::new(ShardedDataCache::new(
                "unsignedTransactions",
                config.tx_capacity,
            )?),
            reward_transactions: Arc::new(ShardedDataCache::new(
                "rewardTransactions",
                config.tx_capacity,
            )?),
            headers: Arc::new(HeadersPool::new(config.headers_capacity)?),
            mini_blocks: Arc::new(MiniBlocksPool::new(config.mini_blocks_capacity)?),
            trie_nodes: Arc::new(TrieNodesPool::new(config.trie_nodes_capacity)?),
            peer_shard_mapper: Arc::new(PeerShardMapper::new()),
        })
    }
}
