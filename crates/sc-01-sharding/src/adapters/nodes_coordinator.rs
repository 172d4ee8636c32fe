//! # Index-Hashed Nodes Coordinator
//!
//! Holds the eligible validator lists per epoch and shard and draws the
//! consensus group for each round.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_crypto::Hasher;
use shared_types::{ShardId, METACHAIN_SHARD_ID};
use tracing::debug;

use crate::algorithms::{select_indexes, selection_seed};
use crate::domain::{ShardingError, Validator};
use crate::ports::NodesCoordinator;

type EligibleMap = HashMap<ShardId, Vec<Validator>>;

/// Nodes coordinator with index-hashed group selection.
pub struct IndexHashedNodesCoordinator {
    hasher: Arc<dyn Hasher>,
    shard_consensus_group_size: usize,
    meta_consensus_group_size: usize,
    eligible: RwLock<HashMap<u32, EligibleMap>>,
}

impl IndexHashedNodesCoordinator {
    /// Create an empty coordinator.
    ///
    /// # Errors
    /// * `InvalidConsensusGroupSize` for a zero group size
    pub fn new(
        hasher: Arc<dyn Hasher>,
        shard_consensus_group_size: usize,
        meta_consensus_group_size: usize,
    ) -> Result<Self, ShardingError> {
        if shard_consensus_group_size == 0 || meta_consensus_group_size == 0 {
            return Err(ShardingError::InvalidConsensusGroupSize {
                size: 0,
                available: 0,
            });
        }
        Ok(Self {
            hasher,
            shard_consensus_group_size,
            meta_consensus_group_size,
            eligible: RwLock::new(HashMap::new()),
        })
    }

    /// Registers the eligible lists of an epoch, replacing earlier ones.
    ///
    /// Every list must be able to fill a consensus group.
    pub fn set_nodes_per_shard(
        &self,
        epoch: u32,
        eligible: HashMap<ShardId, Vec<Validator>>,
    ) -> Result<(), ShardingError> {
        for (shard, list) in &eligible {
            let size = self.consensus_group_size(*shard);
            if list.len() < size {
                return Err(ShardingError::InvalidConsensusGroupSize {
                    size,
                    available: list.len(),
                });
            }
        }
        debug!(epoch, shards = eligible.len(), "[sc-01] eligible lists registered");
        self.eligible.write().insert(epoch, eligible);
        Ok(())
    }

    /// Shard a public key is eligible in for `epoch`.
    pub fn shard_of_public_key(&self, public_key: &[u8], epoch: u32) -> Option<ShardId> {
        let guard = self.eligible.read();
        guard.get(&epoch).and_then(|shards| {
            shards
                .iter()
                .find(|(_, list)| list.iter().any(|v| v.public_key == public_key))
                .map(|(shard, _)| *shard)
        })
    }
}

impl NodesCoordinator for IndexHashedNodesCoordinator {
    fn compute_consensus_group(
        &self,
        randomness: &[u8],
        round: u64,
        shard_id: ShardId,
        epoch: u32,
    ) -> Result<Vec<Validator>, ShardingError> {
        if randomness.is_empty() {
            return Err(ShardingError::EmptyRandomness);
        }
        let guard = self.eligible.read();
        let shards = guard
            .get(&epoch)
            .ok_or(ShardingError::EpochNotFound(epoch))?;
        let list = shards
            .get(&shard_id)
            .ok_or(ShardingError::ShardNotFound(shard_id))?;

        let size = self.consensus_group_size(shard_id);
        if size > list.len() {
            return Err(ShardingError::InvalidConsensusGroupSize {
                size,
                available: list.len(),
            });
        }

        let seed = selection_seed(round, randomness);
        Ok(select_indexes(self.hasher.as_ref(), &seed, size, list.len())
            .into_iter()
            .map(|idx| list[idx].clone())
            .collect())
    }

    fn consensus_group_size(&self, shard_id: ShardId) -> usize {
        if shard_id == METACHAIN_SHARD_ID {
            self.meta_consensus_group_size
        } else {
            self.shard_consensus_group_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::Blake3Hasher;

    fn validators(prefix: u8, n: usize) -> Vec<Validator> {
        (0..n)
            .map(|i| Validator::new(vec![prefix, i as u8], vec![i as u8; 32]))
            .collect()
    }

    fn coordinator() -> IndexHashedNodesCoordinator {
        let c = IndexHashedNodesCoordinator::new(Arc::new(Blake3Hasher::default()), 3, 2).unwrap();
        let mut eligible = HashMap::new();
        eligible.insert(0, validators(0, 5));
        eligible.insert(METACHAIN_SHARD_ID, validators(9, 4));
        c.set_nodes_per_shard(1, eligible).unwrap();
        c
    }

    #[test]
    fn test_group_sizes_per_shard() {
        let c = coordinator();
        assert_eq!(c.compute_consensus_group(b"r", 1, 0, 1).unwrap().len(), 3);
        assert_eq!(
            c.compute_consensus_group(b"r", 1, METACHAIN_SHARD_ID, 1).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_group_is_deterministic() {
        let c = coordinator();
        assert_eq!(
            c.compute_consensus_group(b"seed", 7, 0, 1).unwrap(),
            c.compute_consensus_group(b"seed", 7, 0, 1).unwrap()
        );
    }

    #[test]
    fn test_unknown_epoch_and_shard() {
        let c = coordinator();
        assert_eq!(
            c.compute_consensus_group(b"r", 1, 0, 2).unwrap_err(),
            ShardingError::EpochNotFound(2)
        );
        assert_eq!(
            c.compute_consensus_group(b"r", 1, 3, 1).unwrap_err(),
            ShardingError::ShardNotFound(3)
        );
        assert_eq!(
            c.compute_consensus_group(b"", 1, 0, 1).unwrap_err(),
            ShardingError::EmptyRandomness
        );
    }

    #[test]
    fn test_short_eligible_list_rejected() {
        let c = IndexHashedNodesCoordinator::new(Arc::new(Blake3Hasher::default()), 3, 2).unwrap();
        let mut eligible = HashMap::new();
        eligible.insert(0, validators(0, 2));
        assert!(matches!(
            c.set_nodes_per_shard(0, eligible),
            Err(ShardingError::InvalidConsensusGroupSize { size: 3, available: 2 })
        ));
    }

    #[test]
    fn test_public_keys_follow_group_order() {
        let c = coordinator();
        let group = c.compute_consensus_group(b"abc", 3, 0, 1).unwrap();
        let keys = c.consensus_validators_public_keys(b"abc", 3, 0, 1).unwrap();
        assert_eq!(
            keys,
            group.into_iter().map(|v| v.public_key).collect::<Vec<_>>()
        );
        assert_eq!(c.shard_of_public_key(&[9, 1], 1), Some(METACHAIN_SHARD_ID));
    }
}
