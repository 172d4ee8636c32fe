//! # Transaction Flows
//!
//! Gossip bytes delivered through the in-memory messenger of a shard node,
//! from decode to pool insertion or peer penalty.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;

    use sc_01_sharding::topics;
    use sc_02_data_pool::shard_cache_identifier;
    use sc_03_interceptors::ports::{AntifloodHandler, WhiteListHandler};
    use sc_03_interceptors::{InterceptorsConfig, ProcessError};
    use shared_crypto::{Ed25519KeyGenerator, Ed25519SingleSigner, SingleSigner};
    use shared_types::{Marshaller, MiniBlock, PeerShard, RewardTransaction, ALL_SHARD_ID, U256};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn shard_node(config: InterceptorsConfig) -> Node {
        Node::new(&Committee::new(NUM_SHARDS), config)
    }

    /// Funded sender of shard 0 and a transaction it signed to `rcv_shard`.
    fn funded_tx(node: &Node, nonce: u64, rcv_shard: u32) -> shared_types::Transaction {
        let seed = sender_seed(node.shard_coordinator.as_ref(), 0, 0);
        fund(node, seed, 0);
        signed_tx(
            seed,
            nonce,
            address_in_shard(node.shard_coordinator.as_ref(), rcv_shard),
        )
    }

    fn resign(tx: &mut shared_types::Transaction, seed: u8) {
        let pair = Ed25519KeyGenerator.pair_from_seed([seed; 32]);
        tx.signature.clear();
        let message = tx.signing_bytes(&Marshaller::default()).unwrap();
        tx.signature = Ed25519SingleSigner.sign(&pair.secret, &message).unwrap();
    }

    // =============================================================================
    // ACCEPTANCE
    // =============================================================================

    #[test]
    fn test_intra_shard_transaction_reaches_pool() {
        let node = shard_node(config(0));
        let tx = funded_tx(&node, 0, 0);
        let topic = node.topic(topics::TRANSACTIONS, 0);
        assert_eq!(topic, "transactions_0");

        node.deliver(&topic, batch(vec![encode_tx(&tx)]), &peer(1))
            .unwrap();

        assert_eq!(node.pools.transactions.len_of(&shard_cache_identifier(0, 0)), 1);
        assert_eq!(node.debugger.topic(&topic).accepted, 1);
    }

    #[test]
    fn test_cross_shard_transaction_cached_under_pair() {
        let node = shard_node(config(0));
        let tx = funded_tx(&node, 0, 2);
        let topic = node.topic(topics::TRANSACTIONS, 2);

        node.deliver(&topic, batch(vec![encode_tx(&tx)]), &peer(1))
            .unwrap();

        assert_eq!(node.pools.transactions.len_of("0_2"), 1);
        assert_eq!(node.pools.transactions.len_of("0"), 0);
    }

    #[test]
    fn test_redelivery_is_idempotent() {
        let node = shard_node(config(0));
        let tx = funded_tx(&node, 0, 0);
        let topic = node.topic(topics::TRANSACTIONS, 0);
        let payload = batch(vec![encode_tx(&tx)]);

        node.deliver(&topic, payload.clone(), &peer(1)).unwrap();
        node.deliver(&topic, payload, &peer(2)).unwrap();

        assert_eq!(node.pools.transactions.len(), 1);
        let counters = node.debugger.topic(&topic);
        assert_eq!(counters.accepted, 1);
        assert_eq!(counters.duplicated, 1);
    }

    #[test]
    fn test_foreign_transaction_dropped_silently() {
        let node = shard_node(config(0));
        let seed = sender_seed(node.shard_coordinator.as_ref(), 2, 0);
        let tx = signed_tx(
            seed,
            0,
            address_in_shard(node.shard_coordinator.as_ref(), 3),
        );
        let topic = node.topic(topics::TRANSACTIONS, 2);

        node.deliver(&topic, batch(vec![encode_tx(&tx)]), &peer(1))
            .unwrap();

        assert!(node.pools.transactions.is_empty());
        assert_eq!(node.debugger.topic(&topic).not_for_shard, 1);
        assert!(!node.antiflood.is_blacklisted(&peer(1)));
    }

    // =============================================================================
    // REJECTION
    // =============================================================================

    #[test]
    fn test_forged_signature_blacklists_relayer() {
        let node = shard_node(config(0));
        let mut tx = funded_tx(&node, 0, 0);
        tx.signature[0] ^= 0xff;
        let topic = node.topic(topics::TRANSACTIONS, 0);

        let err = node
            .deliver(&topic, batch(vec![encode_tx(&tx)]), &peer(7))
            .unwrap_err();
        assert!(matches!(err, ProcessError::Crypto(_)));
        assert!(node.antiflood.is_blacklisted(&peer(7)));

        // Even a valid message is now refused from that peer.
        let good = funded_tx(&node, 1, 0);
        assert!(matches!(
            node.deliver(&topic, batch(vec![encode_tx(&good)]), &peer(7)),
            Err(ProcessError::PeerBlacklisted(_))
        ));
        assert!(node.pools.transactions.is_empty());
    }

    #[test]
    fn test_partial_batch_acceptance() {
        let node = shard_node(config(0));
        let first = funded_tx(&node, 0, 0);
        let mut second = funded_tx(&node, 1, 0);
        second.chain_id = b"other-chain".to_vec();
        let seed = sender_seed(node.shard_coordinator.as_ref(), 0, 0);
        resign(&mut second, seed);
        let third = funded_tx(&node, 2, 0);
        let topic = node.topic(topics::TRANSACTIONS, 0);

        let err = node
            .deliver(
                &topic,
                batch(vec![encode_tx(&first), encode_tx(&second), encode_tx(&third)]),
                &peer(3),
            )
            .unwrap_err();

        assert_eq!(err, ProcessError::ChainIdMismatch);
        assert_eq!(node.pools.transactions.len(), 2);
        assert!(node.antiflood.is_blacklisted(&peer(3)));
        let counters = node.debugger.topic(&topic);
        assert_eq!(counters.received, 3);
        assert_eq!(counters.rejected_trust, 1);
    }

    #[test]
    fn test_nonce_window() {
        let node = shard_node(InterceptorsConfig {
            max_tx_nonce_delta_allowed: 5,
            ..config(0)
        });
        let seed = sender_seed(node.shard_coordinator.as_ref(), 0, 0);
        fund(&node, seed, 10);
        let rcv = address_in_shard(node.shard_coordinator.as_ref(), 0);
        let topic = node.topic(topics::TRANSACTIONS, 0);
        let send = |nonce: u64| {
            node.deliver(
                &topic,
                batch(vec![encode_tx(&signed_tx(seed, nonce, rcv.clone()))]),
                &peer(4),
            )
        };

        assert!(matches!(send(9), Err(ProcessError::NonceTooLow { .. })));
        assert!(send(10).is_ok());
        assert!(send(15).is_ok());
        assert!(matches!(send(16), Err(ProcessError::NonceTooHigh { .. })));

        assert_eq!(node.pools.transactions.len(), 2);
        // Structural rejections do not penalize.
        assert!(!node.antiflood.is_blacklisted(&peer(4)));
    }

    #[test]
    fn test_unfunded_sender_rejected() {
        let node = shard_node(config(0));
        let seed = sender_seed(node.shard_coordinator.as_ref(), 0, 1);
        let tx = signed_tx(seed, 0, address_in_shard(node.shard_coordinator.as_ref(), 0));

        let err = node
            .deliver(
                &node.topic(topics::TRANSACTIONS, 0),
                batch(vec![encode_tx(&tx)]),
                &peer(5),
            )
            .unwrap_err();
        assert_eq!(err, ProcessError::AccountNotFound);
    }

    #[test]
    fn test_low_gas_price_rejected() {
        let node = shard_node(config(0));
        let seed = sender_seed(node.shard_coordinator.as_ref(), 0, 0);
        let mut tx = funded_tx(&node, 0, 0);
        tx.gas_price = 1;
        resign(&mut tx, seed);

        let err = node
            .deliver(
                &node.topic(topics::TRANSACTIONS, 0),
                batch(vec![encode_tx(&tx)]),
                &peer(6),
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::InsufficientGasPrice { provided: 1, minimum: 10 }));
        assert!(!node.antiflood.is_blacklisted(&peer(6)));
    }

    #[test]
    fn test_undecodable_payload_blacklists() {
        let node = shard_node(config(0));
        let err = node
            .deliver(&node.topic(topics::TRANSACTIONS, 0), vec![0xff; 5], &peer(8))
            .unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)));
        assert!(node.antiflood.is_blacklisted(&peer(8)));
    }

    // =============================================================================
    // OTHER DATA KINDS
    // =============================================================================

    #[test]
    fn test_reward_from_metachain() {
        let node = shard_node(config(0));
        let reward = RewardTransaction {
            round: 3,
            epoch: 0,
            value: U256::from(5u64),
            rcv_addr: address_in_shard(node.shard_coordinator.as_ref(), 0),
            shard_id: 0,
        };
        let topic = node.topic(topics::REWARDS_TRANSACTIONS, shared_types::METACHAIN_SHARD_ID);
        assert_eq!(topic, "rewardsTransactions_0_META");

        let payload = Marshaller::default().marshal(&reward).unwrap();
        node.deliver(&topic, batch(vec![payload]), &peer(1)).unwrap();

        assert_eq!(node.pools.reward_transactions.len(), 1);
    }

    #[test]
    fn test_broadcast_mini_block() {
        let node = shard_node(config(1));
        let mini_block = MiniBlock {
            tx_hashes: vec![vec![1; 32], vec![2; 32]],
            sender_shard_id: 3,
            receiver_shard_id: ALL_SHARD_ID,
            ..Default::default()
        };
        let payload = Marshaller::default().marshal(&mini_block).unwrap();

        node.deliver("miniBlocks_ALL", batch(vec![payload]), &peer(1))
            .unwrap();

        assert_eq!(node.pools.mini_blocks.len(), 1);
    }

    #[test]
    fn test_peer_shard_announcement() {
        let node = shard_node(InterceptorsConfig {
            enable_peer_shard_topic: true,
            ..config(0)
        });
        let announcement = PeerShard {
            shard_id: "2".to_string(),
        };
        let payload = Marshaller::default().marshal(&announcement).unwrap();

        node.deliver(topics::PEER_SHARD, payload, &peer(9)).unwrap();

        assert_eq!(node.pools.peer_shard_mapper.shard_of(&peer(9)), Some(2));
    }

    // =============================================================================
    // REQUESTED DATA AND RESTRICTED TOPICS
    // =============================================================================

    #[test]
    fn test_requested_foreign_transaction_stored() {
        let committee = Committee::new(NUM_SHARDS);
        let node = Node::new(&committee, config(0));
        let seed = sender_seed(node.shard_coordinator.as_ref(), 2, 0);
        let tx = signed_tx(
            seed,
            0,
            address_in_shard(node.shard_coordinator.as_ref(), 3),
        );
        let payload = encode_tx(&tx);
        node.white_list.add(&[committee.hasher.compute(&payload)]);
        let topic = node.topic(topics::TRANSACTIONS, 2);

        node.deliver(&topic, batch(vec![payload]), &peer(1)).unwrap();

        assert_eq!(node.pools.transactions.len_of(&shard_cache_identifier(2, 3)), 1);
        assert_eq!(node.debugger.topic(&topic).not_for_shard, 0);
    }

    #[test]
    fn test_validators_only_topic_refuses_other_originators() {
        let committee = Committee::new(NUM_SHARDS);
        let node = Node::new(&committee, config(1));
        let topic = node.topic(topics::MINI_BLOCKS, 1);
        node.antiflood.set_topic_for_validators_only(&topic);
        node.antiflood.set_validators([peer(2)]);

        let mini_block = |tag: u8| {
            Marshaller::default()
                .marshal(&MiniBlock {
                    tx_hashes: vec![vec![tag; 32]],
                    sender_shard_id: 1,
                    receiver_shard_id: 1,
                    ..Default::default()
                })
                .unwrap()
        };

        let err = node
            .deliver(&topic, batch(vec![mini_block(1)]), &peer(1))
            .unwrap_err();
        assert!(matches!(err, ProcessError::OriginatorNotEligible { .. }));
        assert!(!node.antiflood.is_blacklisted(&peer(1)));

        node.deliver(&topic, batch(vec![mini_block(2)]), &peer(2))
            .unwrap();

        // Requested data is admitted whoever sends it.
        let requested = mini_block(3);
        node.white_list.add(&[committee.hasher.compute(&requested)]);
        node.deliver(&topic, batch(vec![requested]), &peer(1))
            .unwrap();

        assert_eq!(node.pools.mini_blocks.len(), 2);
        assert_eq!(node.debugger.topic(&topic).rejected_structural, 1);
    }
}
