//! # Container Wiring
//!
//! Topic sets registered by each container flavor against the in-memory
//! messenger, with production adapters.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;

    use std::sync::Arc;

    use sc_03_interceptors::{InMemoryMessenger, InterceptorsConfig, MessageReceiver, ProcessError};
    use shared_types::METACHAIN_SHARD_ID;

    #[test]
    fn test_shard_container_has_21_topics() {
        let node = Node::new(&Committee::new(NUM_SHARDS), config(3));

        assert_eq!(node.container.len(), 21);
        assert_eq!(node.messenger.processor_count(), 21);
        let mut unbound = Vec::new();
        node.container.iterate(|topic, interceptor| {
            assert_eq!(topic, interceptor.topic());
            if !node.messenger.has_processor(topic) {
                unbound.push(topic.to_string());
            }
            true
        });
        assert!(unbound.is_empty(), "unbound topics: {:?}", unbound);
    }

    #[test]
    fn test_meta_container_has_23_topics() {
        let node = Node::new(&Committee::new(NUM_SHARDS), config(METACHAIN_SHARD_ID));
        assert_eq!(node.container.len(), 23);
        assert!(node
            .container
            .keys()
            .iter()
            .all(|k| !k.starts_with("rewardsTransactions")));
    }

    #[test]
    fn test_failed_registration_leaves_nothing_bound() {
        let messenger = Arc::new(InMemoryMessenger::with_failing_topic("metachainBlocks"));
        let result = Node::try_new(&Committee::new(NUM_SHARDS), config(0), messenger.clone());

        assert!(matches!(
            result.err(),
            Some(ProcessError::TopicRegistration { ref topic, .. }) if topic == "metachainBlocks"
        ));
        assert_eq!(messenger.processor_count(), 0);
    }

    #[test]
    fn test_empty_chain_id_is_fatal() {
        let config = InterceptorsConfig {
            chain_id: String::new(),
            ..config(0)
        };
        let result = Node::try_new(
            &Committee::new(NUM_SHARDS),
            config,
            Arc::new(InMemoryMessenger::new()),
        );
        assert_eq!(result.err(), Some(ProcessError::InvalidChainId));
    }

    #[test]
    fn test_container_routes_unknown_topic_to_error() {
        let node = Node::new(&Committee::new(NUM_SHARDS), config(0));
        assert_eq!(
            node.container
                .receive("transactions_9_META", vec![1], &peer(1))
                .unwrap_err(),
            ProcessError::InvalidContainerKey("transactions_9_META".into())
        );
    }

    #[test]
    fn test_config_from_json() {
        let text = r#"{
            "chain_id": "sc-integration",
            "number_of_shards": 4,
            "self_shard_id": 1,
            "marshaller": "Bincode",
            "max_tx_nonce_delta_allowed": 100,
            "consensus_group_size": 4,
            "meta_consensus_group_size": 4,
            "throttler_capacity": 16,
            "enable_peer_shard_topic": true,
            "blacklist_on_decode_failure": false,
            "header_blacklist_duration_secs": 60,
            "antiflood": {
                "peer_max_messages": 10,
                "peer_max_total_size": 1048576,
                "global_max_messages": 100,
                "global_max_total_size": 10485760,
                "topic_max_messages_per_peer": 10,
                "blacklist_duration_secs": 60
            },
            "economics": {
                "min_gas_price": 10,
                "min_gas_limit": 10,
                "gas_per_data_byte": 1
            }
        }"#;
        let parsed: InterceptorsConfig = InterceptorsConfig::from_json(text).unwrap();
        let node = Node::new(&Committee::new(NUM_SHARDS), parsed);
        assert_eq!(node.container.len(), 22);
    }
}
