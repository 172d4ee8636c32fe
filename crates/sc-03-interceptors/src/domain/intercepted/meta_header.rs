//! Intercepted metachain block header.
//!
//! Every node tracks the metachain, so a metachain header is always
//! relevant regardless of the local shard. The epoch-change gate applies to
//! shard headers only; metachain headers are never gated on it.

use std::sync::Arc;

use shared_types::{is_valid_shard_id, Hash, MetaBlock};

use super::checks::{check_chain_id, check_header_fields, check_mini_block_headers};
use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// A decoded metachain header together with its hash.
#[derive(Debug, Clone)]
pub struct InterceptedMetaHeader {
    header: MetaBlock,
    hash: Hash,
    args: Arc<ArgInterceptedDataFactory>,
}

impl InterceptedMetaHeader {
    /// Decodes `buff` and derives the hash.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let header: MetaBlock = args.marshaller.unmarshal(buff)?;
        let hash = args.hasher.compute(buff);
        Ok(Self { header, hash, args })
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
        check_header_fields(&self.header)?;

        let number_of_shards = self.args.shard_coordinator.number_of_shards();
        for shard_data in &self.header.shard_info {
            if !is_valid_shard_id(shard_data.shard_id, number_of_shards) {
                return Err(ProcessError::InvalidShardId(shard_data.shard_id));
            }
            check_mini_block_headers(&shard_data.shard_mini_block_headers, number_of_shards)?;
        }

        let attester = &self.args.validity_attester;
        attester.check_block_against_final(&self.header)?;
        attester.check_block_against_rounder(&self.header)?;

        check_mini_block_headers(&self.header.mini_block_headers, number_of_shards)
    }

    /// The decoded block.
    pub fn header(&self) -> &MetaBlock {
        &self.header
    }

    /// Hash of the received bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Always true.
    pub fn is_for_current_shard(&self) -> bool {
        true
    }
}


#[cfg(test)]
mod tests {
    use super::test_data::valid_meta_header;
    use super::*;
    use crate::domain::arguments::fixtures::{args, builder};
    use sc_01_sharding::TrackedEpochStartTrigger;
    use shared_types::{Marshaller, METACHAIN_SHARD_ID};

    fn encode(header: &MetaBlock) -> Vec<u8> {
        Marshaller::default().marshal(header).unwrap()
    }

    #[test]
    fn test_always_relevant() {
        let buff = encode(&valid_meta_header());
        for self_id in [0, 3] {
            assert!(InterceptedMetaHeader::new(&buff, args(4, self_id))
                .unwrap()
                .is_for_current_shard());
        }
    }

    #[test]
    fn test_valid_meta_header_passes() {
        let buff = encode(&valid_meta_header());
        assert!(InterceptedMetaHeader::new(&buff, args(4, 2))
            .unwrap()
            .check_validity()
            .is_ok());
    }

    #[test]
    fn test_shard_data_out_of_domain_rejected() {
        let mut header = valid_meta_header();
        header.shard_info[0].shard_id = 9;
        let err = InterceptedMetaHeader::new(&encode(&header), args(4, 0))
            .unwrap()
            .check_validity()
            .unwrap_err();
        assert_eq!(err, ProcessError::InvalidShardId(9));
    }

    #[test]
    fn test_shard_data_mini_block_out_of_domain_rejected() {
        let mut header = valid_meta_header();
        header.shard_info[0].shard_mini_block_headers[0].sender_shard_id = 7;
        let err = InterceptedMetaHeader::new(&encode(&header), args(4, 0))
            .unwrap()
            .check_validity()
            .unwrap_err();
        assert_eq!(err, ProcessError::InvalidShardId(7));
    }

    #[test]
    fn test_missing_leader_signature_rejected() {
        let mut header = valid_meta_header();
        header.leader_signature.clear();
        let err = InterceptedMetaHeader::new(&encode(&header), args(4, 0))
            .unwrap()
            .check_validity()
            .unwrap_err();
        assert_eq!(err, ProcessError::MissingField("leader_signature"));
    }

    #[test]
    fn test_previous_epoch_meta_header_accepted_on_metachain() {
        let trigger = Arc::new(TrackedEpochStartTrigger::default());
        trigger.set_epoch_start(5, 100);
        trigger.set_finality_attesting_round(101);
        let args = builder(4, METACHAIN_SHARD_ID)
            .epoch_start_trigger(trigger)
            .build()
            .unwrap();

        // Past the grace window: a shard header here would be gated.
        let mut header = valid_meta_header();
        header.epoch = 4;
        header.round = 103;
        assert!(InterceptedMetaHeader::new(&encode(&header), args)
            .unwrap()
            .check_validity()
            .is_ok());
    }
}
