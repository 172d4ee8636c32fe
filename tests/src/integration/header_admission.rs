//! # Header Admission
//!
//! Shard and metachain headers signed by a real BLS committee, checked by
//! the header signature verifier against the index-hashed consensus group.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;

    use sc_01_sharding::topics;
    use sc_03_interceptors::ports::{AntifloodHandler, BlackListHandler};
    use sc_03_interceptors::ProcessError;
    use shared_crypto::Hasher;
    use shared_types::METACHAIN_SHARD_ID;

    fn setup(self_id: u32) -> (Committee, Node) {
        let committee = Committee::new(NUM_SHARDS);
        let node = Node::new(&committee, config(self_id));
        (committee, node)
    }

    fn signed_shard_header(committee: &Committee, shard: u32, nonce: u64, round: u64) -> Vec<u8> {
        let mut header = shard_header(shard, nonce, round);
        committee.sign(&mut header, 3);
        encode_header(&header)
    }

    // =============================================================================
    // SHARD NODE
    // =============================================================================

    #[test]
    fn test_signed_header_stored() {
        let (committee, node) = setup(0);
        let topic = node.topic(topics::SHARD_BLOCKS, METACHAIN_SHARD_ID);
        assert_eq!(topic, "shardBlocks_0_META");

        node.deliver(&topic, signed_shard_header(&committee, 0, 5, 6), &peer(1))
            .unwrap();

        assert_eq!(node.pools.headers.len(), 1);
        assert_eq!(node.pools.headers.get_headers_by_nonce_and_shard_id(5, 0).len(), 1);
    }

    #[test]
    fn test_tampered_header_blacklists() {
        let (committee, node) = setup(0);
        let mut header = shard_header(0, 5, 6);
        committee.sign(&mut header, 3);
        header.root_hash = vec![0xee; 32];

        let err = node
            .deliver("shardBlocks_0_META", encode_header(&header), &peer(2))
            .unwrap_err();

        assert!(matches!(err, ProcessError::Crypto(_)));
        assert!(node.antiflood.is_blacklisted(&peer(2)));
        assert!(node.pools.headers.is_empty());
    }

    #[test]
    fn test_too_few_signers_rejected() {
        let (committee, node) = setup(0);
        let mut header = shard_header(0, 5, 6);
        committee.sign(&mut header, 2);

        let err = node
            .deliver("shardBlocks_0_META", encode_header(&header), &peer(3))
            .unwrap_err();

        assert_eq!(
            err,
            ProcessError::NotEnoughSignatures {
                signed: 2,
                required: 3
            }
        );
        assert!(node.antiflood.is_blacklisted(&peer(3)));
    }

    #[test]
    fn test_blacklisted_header_hash_refused() {
        let (committee, node) = setup(0);
        let bytes = signed_shard_header(&committee, 0, 5, 6);
        node.header_blacklist.add(&committee.hasher.compute(&bytes));

        let err = node
            .deliver("shardBlocks_0_META", bytes, &peer(4))
            .unwrap_err();

        assert_eq!(err, ProcessError::HeaderIsBlacklisted);
        assert!(!node.antiflood.is_blacklisted(&peer(4)));
    }

    #[test]
    fn test_header_behind_final_rejected() {
        let (committee, node) = setup(0);
        node.tracker.set_final_header(0, 10, 10);

        let err = node
            .deliver(
                "shardBlocks_0_META",
                signed_shard_header(&committee, 0, 5, 6),
                &peer(5),
            )
            .unwrap_err();

        assert!(matches!(err, ProcessError::LowerRoundInBlock { round: 6, final_round: 10 }));
        assert!(!node.antiflood.is_blacklisted(&peer(5)));
    }

    #[test]
    fn test_other_shard_header_not_stored() {
        let (committee, node) = setup(0);

        node.deliver(
            "shardBlocks_0_META",
            signed_shard_header(&committee, 1, 5, 6),
            &peer(6),
        )
        .unwrap();

        assert!(node.pools.headers.is_empty());
        assert_eq!(node.debugger.topic("shardBlocks_0_META").not_for_shard, 1);
    }

    #[test]
    fn test_metachain_block_stored_on_shard() {
        let (committee, node) = setup(2);
        let mut block = meta_block(8, 9);
        committee.sign(&mut block, 4);

        node.deliver(topics::METACHAIN_BLOCKS, encode_meta_block(&block), &peer(1))
            .unwrap();

        assert_eq!(node.pools.headers.len(), 1);
    }

    // =============================================================================
    // METACHAIN NODE
    // =============================================================================

    #[test]
    fn test_metachain_hears_every_shard() {
        let (committee, node) = setup(METACHAIN_SHARD_ID);
        for shard in 0..NUM_SHARDS {
            let topic = format!("shardBlocks_{}_META", shard);
            node.deliver(&topic, signed_shard_header(&committee, shard, 5, 6), &peer(1))
                .unwrap();
        }
        assert_eq!(node.pools.headers.len(), NUM_SHARDS as usize);
    }

    #[test]
    fn test_epoch_gate_grace_period() {
        let (committee, node) = setup(METACHAIN_SHARD_ID);
        node.trigger.set_epoch_start(1, 100);
        node.trigger.set_finality_attesting_round(101);

        // Old-epoch header one round past the attesting round: still in grace.
        node.deliver(
            "shardBlocks_1_META",
            signed_shard_header(&committee, 1, 20, 102),
            &peer(1),
        )
        .unwrap();

        let err = node
            .deliver(
                "shardBlocks_1_META",
                signed_shard_header(&committee, 1, 21, 103),
                &peer(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProcessError::EpochDoesNotMatch {
                header_epoch: 0,
                round: 103
            }
        );
        assert_eq!(node.pools.headers.len(), 1);
        assert!(!node.antiflood.is_blacklisted(&peer(1)));
    }

    #[test]
    fn test_epoch_gate_skips_metachain_blocks() {
        let (committee, node) = setup(METACHAIN_SHARD_ID);
        node.trigger.set_epoch_start(1, 100);
        node.trigger.set_finality_attesting_round(101);

        // Epoch 0, well past the grace round.
        let mut block = meta_block(21, 103);
        committee.sign(&mut block, 4);
        node.deliver(topics::METACHAIN_BLOCKS, encode_meta_block(&block), &peer(1))
            .unwrap();

        assert_eq!(node.pools.headers.len(), 1);
        assert_eq!(node.debugger.topic(topics::METACHAIN_BLOCKS).accepted, 1);
    }

    #[test]
    fn test_epoch_gate_ignored_on_shards() {
        let (committee, node) = setup(1);
        node.trigger.set_epoch_start(1, 100);
        node.trigger.set_finality_attesting_round(101);

        node.deliver(
            "shardBlocks_1_META",
            signed_shard_header(&committee, 1, 21, 103),
            &peer(1),
        )
        .unwrap();
        assert_eq!(node.pools.headers.len(), 1);
    }
}
