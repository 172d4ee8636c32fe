//! # Adapters
//!
//! Concrete implementations of the sharding ports.

pub mod epoch_trigger;
pub mod nodes_coordinator;

pub use epoch_trigger::TrackedEpochStartTrigger;
pub use nodes_coordinator::IndexHashedNodesCoordinator;
