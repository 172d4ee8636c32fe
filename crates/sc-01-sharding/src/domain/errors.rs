//! # Domain Errors
//!
//! Error types for the Sharding subsystem.

use shared_types::ShardId;
use thiserror::Error;

/// Sharding error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardingError {
    /// Zero shards configured.
    #[error("Invalid number of shards: {0}")]
    InvalidNumberOfShards(u32),

    /// Shard id outside `[0, n)` and not the metachain.
    #[error("Invalid shard id: {0}")]
    InvalidShardId(ShardId),

    /// No committee registered for the epoch.
    #[error("No validators registered for epoch {0}")]
    EpochNotFound(u32),

    /// No committee registered for the shard.
    #[error("No validators registered for shard {0}")]
    ShardNotFound(ShardId),

    /// The eligible list cannot fill a consensus group.
    #[error("Consensus group size {size} exceeds {available} eligible validators")]
    InvalidConsensusGroupSize {
        /// Requested group size
        size: usize,
        /// Eligible validators
        available: usize,
    },

    /// Consensus group selection needs a random seed.
    #[error("Empty randomness")]
    EmptyRandomness,
}
