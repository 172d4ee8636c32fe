//! Intercepted user transaction.

use std::sync::Arc;

use shared_types::{Hash, ShardId, Transaction};

use super::checks::check_chain_id;
use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// A decoded user transaction with its routing shards.
#[derive(Debug, Clone)]
pub struct InterceptedTransaction {
    tx: Transaction,
    hash: Hash,
    snd_shard: ShardId,
    rcv_shard: ShardId,
    is_for_current_shard: bool,
    args: Arc<ArgInterceptedDataFactory>,
}

impl InterceptedTransaction {
    /// Decodes `buff`, hashes it and computes both routing shards.
    ///
    /// An empty receiver address routes to the sender's shard.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let tx: Transaction = args.marshaller.unmarshal(buff)?;
        let hash = args.hasher.compute(buff);

        let coordinator = &args.shard_coordinator;
        let snd_shard = coordinator.compute_id(&tx.snd_addr);
        let rcv_shard = if tx.rcv_addr.is_empty() {
            snd_shard
        } else {
            coordinator.compute_id(&tx.rcv_addr)
        };
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

    /// Structure and economics first, then chain id and the sender signature.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        self.integrity()?;
        check_chain_id(&self.args.chain_id, &self.tx.chain_id)?;
        self.verify_sig()
    }

    fn integrity(&self) -> Result<(), ProcessError> {
        if self.tx.signature.is_empty() {
            return Err(ProcessError::MissingField("signature"));
        }
        let codec = &self.args.address_codec;
        codec.check(&self.tx.rcv_addr).map_err(ProcessError::InvalidRcvAddr)?;
        codec.check(&self.tx.snd_addr).map_err(ProcessError::InvalidSndAddr)?;

        self.args.fee_handler.check_validity_tx_values(&self.tx)
    }

    fn verify_sig(&self) -> Result<(), ProcessError> {
        self.args.tx_key_gen.check_public_key(&self.tx.snd_addr)?;
        let message = self.tx.signing_bytes(&self.args.marshaller)?;
        self.args
            .tx_single_signer
            .verify(&self.tx.snd_addr, &message, &self.tx.signature)?;
        Ok(())
    }

    /// The decoded transaction.
    pub fn transaction(&self) -> &Transaction {
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
