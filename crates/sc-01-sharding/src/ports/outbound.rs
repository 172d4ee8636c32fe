//! # Outbound Ports
//!
//! State owned by other subsystems that sharding decisions depend on.

use crate::domain::EpochStartState;

/// Tracks epoch transitions.
pub trait EpochStartTrigger: Send + Sync {
    /// Current epoch.
    fn epoch(&self) -> u32;

    /// Round in which the current epoch started.
    fn epoch_start_round(&self) -> u64;

    /// Round in which the epoch start was attested as final.
    fn epoch_finality_attesting_round(&self) -> u64;

    /// All three values read together.
    fn snapshot(&self) -> EpochStartState {
        EpochStartState {
            epoch: self.epoch(),
            start_round: self.epoch_start_round(),
            finality_attesting_round: self.epoch_finality_attesting_round(),
        }
    }
}
