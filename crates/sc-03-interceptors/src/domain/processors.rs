//! # Interceptor Processors
//!
//! The last stage of the pipeline: a validator against local state, then
//! insertion into the destination pool. Insertion is idempotent on the
//! content hash.

use std::sync::Arc;

use shared_types::{HeaderHandler, PeerId, RewardTransaction, SmartContractResult, Transaction};
use sc_02_data_pool::{
    shard_cache_identifier, HeadersPool, MiniBlocksPool, PeerShardMapper, ShardedDataCache,
    TrieNodesPool,
};
use tracing::trace;

use crate::domain::intercepted::InterceptedData;
use crate::domain::validators::DataValidator;
use crate::domain::ProcessError;
use crate::ports::BlackListHandler;

/// Validates intercepted data against local state and stores it.
pub trait InterceptorProcessor: Send + Sync {
    /// Local-state checks. Failures never penalize the sender.
    fn validate(&self, data: &InterceptedData) -> Result<(), ProcessError>;

    /// Stores the object. Returns `false` if it was already known.
    fn save(&self, data: InterceptedData, from: &PeerId) -> Result<bool, ProcessError>;
}

/// Destination cache of a transaction processor.
pub enum TxPool {
    /// User transactions.
    Transactions(Arc<ShardedDataCache<Transaction>>),
    /// Smart contract results.
    Unsigned(Arc<ShardedDataCache<SmartContractResult>>),
    /// Rewards issued by the metachain.
    Rewards(Arc<ShardedDataCache<RewardTransaction>>),
}

/// Stores transactions of one kind in their sender/receiver cache.
pub struct TxInterceptorProcessor {
    pool: TxPool,
    validator: DataValidator,
}

impl TxInterceptorProcessor {
    /// `validator` must accept the kind stored in `pool`.
    pub fn new(pool: TxPool, validator: DataValidator) -> Self {
        Self { pool, validator }
    }
}

impl InterceptorProcessor for TxInterceptorProcessor {
    fn validate(&self, data: &InterceptedData) -> Result<(), ProcessError> {
        self.validator.validate(data)
    }

    fn save(&self, data: InterceptedData, _from: &PeerId) -> Result<bool, ProcessError> {
        let added = match (&self.pool, data) {
            (TxPool::Transactions(cache), InterceptedData::Transaction(tx)) => {
                let cache_id = shard_cache_identifier(tx.snd_shard(), tx.rcv_shard());
                cache.add_data(tx.hash().to_vec(), tx.transaction().clone(), &cache_id)?
            }
            (TxPool::Unsigned(cache), InterceptedData::UnsignedTransaction(tx)) => {
                let cache_id = shard_cache_identifier(tx.snd_shard(), tx.rcv_shard());
                cache.add_data(tx.hash().to_vec(), tx.transaction().clone(), &cache_id)?
            }
            (TxPool::Rewards(cache), InterceptedData::RewardTransaction(tx)) => {
                let cache_id = shard_cache_identifier(tx.snd_shard(), tx.rcv_shard());
                cache.add_data(tx.hash().to_vec(), tx.transaction().clone(), &cache_id)?
            }
            _ => return Err(ProcessError::WrongTypeAssertion),
        };
        Ok(added)
    }
}

/// Stores shard and metachain headers, refusing blacklisted hashes.
pub struct HdrInterceptorProcessor {
    headers: Arc<HeadersPool>,
    blacklist: Arc<dyn BlackListHandler>,
    validator: DataValidator,
}

impl HdrInterceptorProcessor {
    /// Hashes in `blacklist` are refused before `validator` runs.
    pub fn new(
        headers: Arc<HeadersPool>,
        blacklist: Arc<dyn BlackListHandler>,
        validator: DataValidator,
    ) -> Self {
        Self {
            headers,
            blacklist,
            validator,
        }
    }
}

impl InterceptorProcessor for HdrInterceptorProcessor {
    fn validate(&self, data: &InterceptedData) -> Result<(), ProcessError> {
        if self.blacklist.has(data.hash()) {
            return Err(ProcessError::HeaderIsBlacklisted);
        }
        self.validator.validate(data)
    }

    fn save(&self, data: InterceptedData, _from: &PeerId) -> Result<bool, ProcessError> {
        let (hash, header): (Vec<u8>, Arc<dyn HeaderHandler>) = match data {
            InterceptedData::ShardHeader(h) => (h.hash().to_vec(), Arc::new(h.header().clone())),
            InterceptedData::MetaHeader(h) => (h.hash().to_vec(), Arc::new(h.header().clone())),
            _ => return Err(ProcessError::WrongTypeAssertion),
        };
        trace!(
            shard = header.shard_id(),
            nonce = header.nonce(),
            "[sc-03] saving header"
        );
        Ok(self.headers.add_header(hash, header)?)
    }
}

/// Stores mini-blocks.
pub struct MiniBlockInterceptorProcessor {
    pool: Arc<MiniBlocksPool>,
    validator: DataValidator,
}

impl MiniBlockInterceptorProcessor {
    /// Wraps the shared mini-block pool.
    pub fn new(pool: Arc<MiniBlocksPool>, validator: DataValidator) -> Self {
        Self { pool, validator }
    }
}

impl InterceptorProcessor for MiniBlockInterceptorProcessor {
    fn validate(&self, data: &InterceptedData) -> Result<(), ProcessError> {
        self.validator.validate(data)
    }

    fn save(&self, data: InterceptedData, _from: &PeerId) -> Result<bool, ProcessError> {
        let InterceptedData::MiniBlock(mb) = data else {
            return Err(ProcessError::WrongTypeAssertion);
        };
        Ok(self.pool.has_or_add(mb.hash().to_vec(), mb.mini_block().clone())?)
    }
}

/// Stores raw trie nodes.
pub struct TrieNodeInterceptorProcessor {
    pool: Arc<TrieNodesPool>,
}

impl TrieNodeInterceptorProcessor {
    /// Nodes are stored without validation.
    pub fn new(pool: Arc<TrieNodesPool>) -> Self {
        Self { pool }
    }
}

impl InterceptorProcessor for TrieNodeInterceptorProcessor {
    fn validate(&self, _data: &InterceptedData) -> Result<(), ProcessError> {
        Ok(())
    }

    fn save(&self, data: InterceptedData, _from: &PeerId) -> Result<bool, ProcessError> {
        let InterceptedData::TrieNode(node) = data else {
            return Err(ProcessError::WrongTypeAssertion);
        };
        Ok(self.pool.put(node.hash().to_vec(), node.encoded().to_vec()))
    }
}

/// Records which shard a peer announced.
pub struct PeerShardInterceptorProcessor {
    mapper: Arc<PeerShardMapper>,
}

impl PeerShardInterceptorProcessor {
    /// Announcements go straight into `mapper`.
    pub fn new(mapper: Arc<PeerShardMapper>) -> Self {
        Self { mapper }
    }
}

impl InterceptorProcessor for PeerShardInterceptorProcessor {
    fn validate(&self, _data: &InterceptedData) -> Result<(), ProcessError> {
        Ok(())
    }

    fn save(&self, data: InterceptedData, from: &PeerId) -> Result<bool, ProcessError> {
        let InterceptedData::PeerShard(announced) = data else {
            return Err(ProcessError::WrongTypeAssertion);
        };
        let shard_id = announced.shard_id()?;
        let previous = self.mapper.shard_of(from);
        self.mapper.update_peer_shard(from.clone(), shard_id);
        Ok(previous != Some(shard_id))
    }
}
