//! # SC-01 Sharding
//!
//! Shard topology, topic naming, committee selection and epoch tracking.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Map addresses to shards by their trailing bytes
//! - Name the gossip channel between any two shards
//! - Draw the consensus group of a round from the eligible list
//! - Expose the epoch-start state that header admission gates on
//!
//! ## Module Structure
//!
//! ```text
//! sc-01-sharding/
//! ├── domain/          # MultiShardCoordinator, topics, Validator, errors
//! ├── algorithms/      # Shard assignment, index-hashed group selection
//! ├── ports/           # ShardCoordinator, NodesCoordinator, EpochStartTrigger
//! └── adapters/        # IndexHashedNodesCoordinator, TrackedEpochStartTrigger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{IndexHashedNodesCoordinator, TrackedEpochStartTrigger};
pub use domain::{
    communication_identifier, topics, EpochStartState, MultiShardCoordinator, ShardingError,
    Validator,
};
pub use ports::{EpochStartTrigger, NodesCoordinator, ShardCoordinator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
