//! # Multi-Shard Coordinator
//!
//! Knows the shard count and the local shard, maps addresses to shards and
//! names the communication channel between two shards.

use shared_types::{ShardId, ALL_SHARD_ID, METACHAIN_SHARD_ID};

use crate::algorithms::{assign_shard, compute_masks};
use crate::domain::ShardingError;
use crate::ports::ShardCoordinator;

/// Default shard coordinator.
#[derive(Debug, Clone)]
pub struct MultiShardCoordinator {
    number_of_shards: u32,
    self_id: ShardId,
    masks: (u32, u32),
}

impl MultiShardCoordinator {
    /// Create a coordinator for `number_of_shards` shards, running as `self_id`.
    ///
    /// # Errors
    /// * `InvalidNumberOfShards` for zero shards
    /// * `InvalidShardId` when `self_id` is neither a shard nor the metachain
    pub fn new(number_of_shards: u32, self_id: ShardId) -> Result<Self, ShardingError> {
        if number_of_shards == 0 {
            return Err(ShardingError::InvalidNumberOfShards(number_of_shards));
        }
        if self_id >= number_of_shards && self_id != METACHAIN_SHARD_ID {
            return Err(ShardingError::InvalidShardId(self_id));
        }
        Ok(Self {
            number_of_shards,
            self_id,
            masks: compute_masks(number_of_shards),
        })
    }
}

impl ShardCoordinator for MultiShardCoordinator {
    fn number_of_shards(&self) -> u32 {
        self.number_of_shards
    }

    fn self_id(&self) -> ShardId {
        self.self_id
    }

    fn compute_id(&self, address: &[u8]) -> ShardId {
        assign_shard(address, self.number_of_shards, self.masks)
    }

    fn communication_identifier(&self, destination: ShardId) -> String {
        communication_identifier(self.self_id, destination)
    }
}

/// Channel suffix between `self_id` and `destination`.
///
/// Shard pairs are rendered in ascending order; the metachain always renders
/// as the trailing `META`.
pub fn communication_identifier(self_id: ShardId, destination: ShardId) -> String {
    if destination == ALL_SHARD_ID {
        return "_ALL".to_string();
    }
    if destination == self_id {
        if self_id == METACHAIN_SHARD_ID {
            return "_META".to_string();
        }
        return format!("_{}", self_id);
    }
    if destination == METACHAIN_SHARD_ID {
        return format!("_{}_META", self_id);
    }
    if self_id == METACHAIN_SHARD_ID {
        return format!("_{}_META", destination);
    }
    let (lo, hi) = if self_id < destination {
        (self_id, destination)
    } else {
        (destination, self_id)
    };
    format!("_{}_{}", lo, hi)
}
