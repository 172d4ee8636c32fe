//! # Ports Layer
//!
//! Inbound traits implemented here, outbound traits implemented elsewhere.

pub mod inbound;
pub mod outbound;

pub use inbound::{NodesCoordinator, ShardCoordinator};
pub use outbound::EpochStartTrigger;
