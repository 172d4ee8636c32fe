//! # Domain Layer
//!
//! Shard coordination, topic naming and committee entities.

pub mod coordinator;
pub mod entities;
pub mod errors;
pub mod topics;

pub use coordinator::{communication_identifier, MultiShardCoordinator};
pub use entities::{EpochStartState, Validator};
pub use errors::ShardingError;
