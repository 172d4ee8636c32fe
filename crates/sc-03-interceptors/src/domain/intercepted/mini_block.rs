//! Intercepted mini-block.

use std::sync::Arc;

use shared_types::{is_valid_shard_id, Hash, MiniBlock, ALL_SHARD_ID};

use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// A decoded mini-block.
#[derive(Debug, Clone)]
pub struct InterceptedMiniBlock {
    mini_block: MiniBlock,
    hash: Hash,
    is_for_current_shard: bool,
    args: Arc<ArgInterceptedDataFactory>,
}

impl InterceptedMiniBlock {
    /// Decodes `buff` and derives the hash.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let mini_block: MiniBlock = args.marshaller.unmarshal(buff)?;
        let hash = args.hasher.compute(buff);

        let self_id = args.shard_coordinator.self_id();
        let is_for_current_shard = mini_block.sender_shard_id == self_id
            || mini_block.receiver_shard_id == self_id
            || mini_block.receiver_shard_id == ALL_SHARD_ID;

        Ok(Self {
            mini_block,
            hash,
            is_for_current_shard,
            args,
        })
    }

    /// Sender must be a shard or the metachain; the receiver may also be
    /// the broadcast sentinel.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        let n = self.args.shard_coordinator.number_of_shards();
        if !is_valid_shard_id(self.mini_block.sender_shard_id, n) {
            return Err(ProcessError::InvalidShardId(self.mini_block.sender_shard_id));
        }
        let receiver = self.mini_block.receiver_shard_id;
        if receiver != ALL_SHARD_ID && !is_valid_shard_id(receiver, n) {
            return Err(ProcessError::InvalidShardId(receiver));
        }
        Ok(())
    }

    /// The decoded mini-block.
    pub fn mini_block(&self) -> &MiniBlock {
        &self.mini_block
    }

    /// Hash of the received bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// True when this shard is the receiver.
    pub fn is_for_current_shard(&self) -> bool {
        self.is_for_current_shard
    }
}
