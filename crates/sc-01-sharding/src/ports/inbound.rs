//! # Inbound Ports
//!
//! What the rest of the node asks of the sharding subsystem.

use shared_types::ShardId;

use crate::domain::{ShardingError, Validator};

/// Shard topology as seen by the local node.
pub trait ShardCoordinator: Send + Sync {
    /// Number of shards, metachain excluded.
    fn number_of_shards(&self) -> u32;

    /// Local shard (or the metachain sentinel).
    fn self_id(&self) -> ShardId;

    /// Shard owning `address`.
    fn compute_id(&self, address: &[u8]) -> ShardId;

    /// Topic suffix for traffic between the local shard and `destination`.
    fn communication_identifier(&self, destination: ShardId) -> String;

    /// True when both addresses live in the same shard.
    fn same_shard(&self, first: &[u8], second: &[u8]) -> bool {
        self.compute_id(first) == self.compute_id(second)
    }
}

/// Committee membership per epoch and shard.
pub trait NodesCoordinator: Send + Sync {
    /// Consensus group for a round; the leader comes first.
    fn compute_consensus_group(
        &self,
        randomness: &[u8],
        round: u64,
        shard_id: ShardId,
        epoch: u32,
    ) -> Result<Vec<Validator>, ShardingError>;

    /// Public keys of the consensus group, in group order.
    fn consensus_validators_public_keys(
        &self,
        randomness: &[u8],
        round: u64,
        shard_id: ShardId,
        epoch: u32,
    ) -> Result<Vec<Vec<u8>>, ShardingError> {
        Ok(self
            .compute_consensus_group(randomness, round, shard_id, epoch)?
            .into_iter()
            .map(|v| v.public_key)
            .collect())
    }

    /// Configured consensus group size for a shard.
    fn consensus_group_size(&self, shard_id: ShardId) -> usize;
}
