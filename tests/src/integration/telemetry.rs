//! # Telemetry
//!
//! Subscriber installation and the Prometheus text exposition, fed by a
//! real interception.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;

    use sc_01_sharding::topics;
    use sc_telemetry::{encode_metrics, init_telemetry, TelemetryConfig, TelemetryError};

    #[test]
    fn test_init_once_then_metrics_exposed() {
        let config = TelemetryConfig {
            log_level: "sc_03_interceptors=debug,info".to_string(),
            ..Default::default()
        };
        let handle = init_telemetry(&config).unwrap();
        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::TracingInit(_))
        ));

        let node = Node::new(&Committee::new(NUM_SHARDS), super::super::fixtures::config(0));
        let seed = sender_seed(node.shard_coordinator.as_ref(), 0, 0);
        fund(&node, seed, 0);
        let tx = signed_tx(seed, 0, address_in_shard(node.shard_coordinator.as_ref(), 0));
        node.deliver(
            &node.topic(topics::TRANSACTIONS, 0),
            batch(vec![encode_tx(&tx)]),
            &peer(1),
        )
        .unwrap();

        let text = handle.render().unwrap();
        assert!(text.contains("shard_chain_build_info"));
        assert!(text.contains("interceptors_messages_received_total"));
        assert!(text.contains("interceptors_messages_accepted_total"));
        assert!(!encode_metrics().unwrap().is_empty());
    }
}
