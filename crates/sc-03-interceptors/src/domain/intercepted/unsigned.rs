//! Intercepted smart-contract result.

use std::sync::Arc;

use shared_types::{Hash, ShardId, SmartContractResult};

use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// A decoded smart-contract result with its routing shards.
#[derive(Debug, Clone)]
pub struct InterceptedUnsignedTransaction {
    tx: SmartContractResult,
    hash: Hash,
    snd_shard: ShardId,
    rcv_shard: ShardId,
    is_for_current_shard: bool,
    args: Arc<ArgInterceptedDataFactory>,
}

impl InterceptedUnsignedTransaction {
    /// Decodes `buff` and resolves both shards.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let tx: SmartContractResult = args.marshaller.unmarshal(buff)?;
        let hash = args.hasher.compute(buff);

        let coordinator = &args.shard_coordinator;
        let snd_shard = coordinator.compute_id(&tx.snd_addr);
        let rcv_shard = coordinator.compute_id(&tx.rcv_addr);
        let self_id = coordinator.self_id();
        let is_for_current_shard = snd_shard == self_id || rcv_shard == self_id;

        Ok(Self {
            tx,
            hash,
            snd_shard,
            rcv_shard,
            is_for_current_shard,
            args,
        })
    }

    /// Both addresses and the originating transaction hash are required.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        let codec = &self.args.address_codec;
        codec.check(&self.tx.rcv_addr).map_err(ProcessError::InvalidRcvAddr)?;
        codec.check(&self.tx.snd_addr).map_err(ProcessError::InvalidSndAddr)?;
        if self.tx.prev_tx_hash.is_empty() {
            return Err(ProcessError::MissingField("prev_tx_hash"));
        }
        Ok(())
    }

    /// The decoded result.
    pub fn transaction(&self) -> &SmartContractResult {
        &self.tx
    }

    /// Hash of the received bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Shard of the sender address.
    pub fn snd_shard(&self) -> ShardId {
        self.snd_shard
    }

    /// Shard of the receiver address.
    pub fn rcv_shard(&self) -> ShardId {
        self.rcv_shard
    }

    /// True when this shard sends or receives.
    pub fn is_for_current_shard(&self) -> bool {
        self.is_for_current_shard
    }
}
