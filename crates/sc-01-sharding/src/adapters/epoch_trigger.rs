//! # Tracked Epoch-Start Trigger
//!
//! In-memory trigger updated by block processing as epoch-start blocks are
//! committed and then attested.

use parking_lot::RwLock;
use tracing::info;

use crate::domain::EpochStartState;
use crate::ports::EpochStartTrigger;

/// Epoch-start trigger backed by a lock-protected snapshot.
#[derive(Debug, Default)]
pub struct TrackedEpochStartTrigger {
    state: RwLock<EpochStartState>,
}

impl TrackedEpochStartTrigger {
    /// Create a trigger from a known state.
    pub fn new(state: EpochStartState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// A new epoch started at `round`; it is not yet attested.
    pub fn set_epoch_start(&self, epoch: u32, round: u64) {
        let mut state = self.state.write();
        state.epoch = epoch;
        state.start_round = round;
        info!(epoch, round, "[sc-01] epoch start");
    }

    /// The current epoch start was finalized in `round`.
    pub fn set_finality_attesting_round(&self, round: u64) {
        self.state.write().finality_attesting_round = round;
    }
}

impl EpochStartTrigger for TrackedEpochStartTrigger {
    fn epoch(&self) -> u32 {
        self.state.read().epoch
    }

    fn epoch_start_round(&self) -> u64 {
        self.state.read().start_round
    }

    fn epoch_finality_attesting_round(&self) -> u64 {
        self.state.read().finality_attesting_round
    }

    fn snapshot(&self) -> EpochStartState {
        *self.state.read()
    }
}
