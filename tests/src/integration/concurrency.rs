//! # Concurrent Delivery
//!
//! Many peers delivering at once through one container: pools stay
//! consistent and the shared throttler always drains back to zero.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;

    use std::sync::Arc;

    use rayon::prelude::*;
    use sc_01_sharding::topics;
    use sc_03_interceptors::{InterceptorsConfig, ProcessError};

    const SENDERS: usize = 24;

    fn funded_senders(node: &Node) -> Vec<u8> {
        (0..SENDERS)
            .map(|k| {
                let seed = sender_seed(node.shard_coordinator.as_ref(), 0, k);
                fund(node, seed, 0);
                seed
            })
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_senders_all_accepted() {
        let node = Arc::new(Node::new(&Committee::new(NUM_SHARDS), config(0)));
        let rcv = address_in_shard(node.shard_coordinator.as_ref(), 0);
        let topic = node.topic(topics::TRANSACTIONS, 0);

        let handles: Vec<_> = funded_senders(&node)
            .into_iter()
            .enumerate()
            .map(|(i, seed)| {
                let node = node.clone();
                let topic = topic.clone();
                let payload = batch(vec![encode_tx(&signed_tx(seed, 0, rcv.clone()))]);
                tokio::task::spawn_blocking(move || node.deliver(&topic, payload, &peer(i as u8)))
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(node.pools.transactions.len(), SENDERS);
        assert_eq!(node.throttler.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_throttled_delivery_drains() {
        let node = Arc::new(Node::new(
            &Committee::new(NUM_SHARDS),
            InterceptorsConfig {
                throttler_capacity: 1,
                ..config(0)
            },
        ));
        let rcv = address_in_shard(node.shard_coordinator.as_ref(), 0);
        let topic = node.topic(topics::TRANSACTIONS, 0);

        let handles: Vec<_> = funded_senders(&node)
            .into_iter()
            .enumerate()
            .map(|(i, seed)| {
                let node = node.clone();
                let topic = topic.clone();
                let payload = batch(vec![encode_tx(&signed_tx(seed, 0, rcv.clone()))]);
                tokio::task::spawn_blocking(move || node.deliver(&topic, payload, &peer(i as u8)))
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => accepted += 1,
                Err(ProcessError::SystemBusy) => {}
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert!(accepted >= 1);
        assert_eq!(node.pools.transactions.len(), accepted);
        assert_eq!(node.throttler.in_flight(), 0);
    }

    #[test]
    fn test_concurrent_duplicates_stored_once() {
        let node = Node::new(&Committee::new(NUM_SHARDS), config(0));
        let seed = funded_senders(&node)[0];
        let rcv = address_in_shard(node.shard_coordinator.as_ref(), 0);
        let topic = node.topic(topics::TRANSACTIONS, 0);
        let payload = batch(vec![encode_tx(&signed_tx(seed, 0, rcv))]);

        (0..64u8).into_par_iter().for_each(|i| {
            node.deliver(&topic, payload.clone(), &peer(i)).unwrap();
        });

        assert_eq!(node.pools.transactions.len(), 1);
        let counters = node.debugger.topic(&topic);
        assert_eq!(counters.accepted, 1);
        assert_eq!(counters.duplicated, 63);
    }
}
