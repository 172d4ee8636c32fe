//! # Algorithms
//!
//! Pure functions behind shard assignment and committee selection.

pub mod consensus_group;
pub mod shard_assignment;

pub use consensus_group::{compute_list_index, select_indexes, selection_seed};
pub use shard_assignment::{assign_shard, compute_masks};
