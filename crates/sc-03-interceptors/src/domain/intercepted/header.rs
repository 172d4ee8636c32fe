//! Intercepted shard block header.

use std::sync::Arc;

use shared_types::{Hash, Header, HeaderHandler, METACHAIN_SHARD_ID};

use super::checks::{
    check_chain_id, check_header_fields, check_mini_block_headers, is_epoch_correct,
};
use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// A decoded shard header together with its hash and relevance.
#[derive(Debug, Clone)]
pub struct InterceptedHeader {
    header: Header,
    hash: Hash,
    is_for_current_shard: bool,
    args: Arc<ArgInterceptedDataFactory>,
}

impl InterceptedHeader {
    /// Decodes `buff` and derives the hash and relevance.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let header: Header = args.marshaller.unmarshal(buff)?;
        let hash = args.hasher.compute(buff);
        let self_id = args.shard_coordinator.self_id();
        let is_for_current_shard = header.shard_id == self_id || self_id == METACHAIN_SHARD_ID;

        Ok(Self {
            header,
            hash,
            is_for_current_shard,
            args,
        })
    }

    /// Structural checks, anti-rollback, then signatures and chain id.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        self.integrity()?;

        let verifier = &self.args.header_sig_verifier;
        verifier.verify_rand_seed_and_leader_signature(&self.header)?;
        verifier.verify_signature(&self.header)?;

        check_chain_id(&self.args.chain_id, &self.header.chain_id)
    }

    fn integrity(&self) -> Result<(), ProcessError> {
        let trigger = self.args.epoch_start_trigger.snapshot();
        if !is_epoch_correct(
            self.args.shard_coordinator.self_id(),
            &trigger,
            self.header.epoch,
            self.header.round,
        ) {
            return Err(ProcessError::EpochDoesNotMatch {
                header_epoch: self.header.epoch,
                round: self.header.round,
            });
        }

        check_header_fields(&self.header)?;

        let attester = &self.args.validity_attester;
        attester.check_block_against_final(&self.header)?;
        attester.check_block_against_rounder(&self.header)?;

        check_mini_block_headers(
            &self.header.mini_block_headers,
            self.args.shard_coordinator.number_of_shards(),
        )
    }

    /// The decoded header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Hash of the received bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// True on the header's own shard and on the metachain.
    pub fn is_for_current_shard(&self) -> bool {
        self.is_for_current_shard
    }
}
