//! # Domain Entities

use serde::{Deserialize, Serialize};

/// An eligible validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Validator {
    /// BLS public key (G2, compressed)
    pub public_key: Vec<u8>,
    /// Reward address
    pub address: Vec<u8>,
}

impl Validator {
    /// Create a validator.
    pub fn new(public_key: Vec<u8>, address: Vec<u8>) -> Self {
        Self {
            public_key,
            address,
        }
    }
}

/// Snapshot of the epoch-start trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochStartState {
    /// Current epoch
    pub epoch: u32,
    /// Round in which the current epoch started
    pub start_round: u64,
    /// Round in which the epoch start was finalized
    pub finality_attesting_round: u64,
}
