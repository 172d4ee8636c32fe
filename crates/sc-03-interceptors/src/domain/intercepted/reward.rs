//! Intercepted reward transaction.
//!
//! Rewards are minted by the metachain, so the sender side is always the
//! metachain and there is no signature to check.

use std::sync::Arc;

use shared_types::{Hash, RewardTransaction, ShardId, METACHAIN_SHARD_ID};

use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// A decoded reward transaction.
#[derive(Debug, Clone)]
pub struct InterceptedRewardTransaction {
    tx: RewardTransaction,
    hash: Hash,
    rcv_shard: ShardId,
    is_for_current_shard: bool,
    args: Arc<ArgInterceptedDataFactory>,
}

impl InterceptedRewardTransaction {
    /// Decodes `buff` and resolves both shards.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let tx: RewardTransaction = args.marshaller.unmarshal(buff)?;
        let hash = args.hasher.compute(buff);

        let self_id = args.shard_coordinator.self_id();
        let rcv_shard = args.shard_coordinator.compute_id(&tx.rcv_addr);
        let is_for_current_shard = rcv_shard == self_id || self_id == METACHAIN_SHARD_ID;

        Ok(Self {
            tx,
            hash,
            rcv_shard,
            is_for_current_shard,
            args,
        })
    }

    /// Receiver address and a non-zero value are required.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        if self.tx.rcv_addr.is_empty() {
            return Err(ProcessError::MissingField("rcv_addr"));
        }
        self.args
            .address_codec
            .check(&self.tx.rcv_addr)
            .map_err(ProcessError::InvalidRcvAddr)?;
        if self.tx.value.is_zero() {
            return Err(ProcessError::MissingField("value"));
        }
        Ok(())
    }

    /// The decoded reward.
    pub fn transaction(&self) -> &RewardTransaction {
        &self.tx
    }

    /// Hash of the received bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Always the metachain.
    pub fn snd_shard(&self) -> ShardId {
        METACHAIN_SHARD_ID
    }

    /// Shard of the receiver address.
    pub fn rcv_shard(&self) -> ShardId {
        self.rcv_shard
    }

    /// True on the receiving shard.
    pub fn is_for_current_shard(&self) -> bool {
        self.is_for_current_shard
    }
}
