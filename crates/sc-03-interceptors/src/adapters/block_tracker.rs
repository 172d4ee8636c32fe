//! # Final Header Tracker
//!
//! Remembers the last final header of every shard and the local round, and
//! refuses headers that would roll back finality or come from the future.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use shared_types::{HeaderHandler, ShardId};
use tracing::debug;

use crate::domain::ProcessError;
use crate::ports::ValidityAttester;

#[derive(Debug, Clone, Copy)]
struct FinalInfo {
    nonce: u64,
    round: u64,
}

/// Validity attester fed by block processing and the round clock.
#[derive(Debug, Default)]
pub struct FinalHeaderTracker {
    finals: RwLock<HashMap<ShardId, FinalInfo>>,
    current_round: AtomicU64,
}

impl FinalHeaderTracker {
    /// Round zero, no final headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the last final header of `shard_id`.
    pub fn set_final_header(&self, shard_id: ShardId, nonce: u64, round: u64) {
        debug!(shard_id, nonce, round, "[sc-03] final header updated");
        self.finals.write().insert(shard_id, FinalInfo { nonce, round });
    }

    /// Advances the local round clock.
    pub fn set_current_round(&self, round: u64) {
        self.current_round.store(round, Ordering::Release);
    }

    /// Latest round seen.
    pub fn current_round(&self) -> u64 {
        self.current_round.load(Ordering::Acquire)
    }
}

impl ValidityAttester for FinalHeaderTracker {
    fn check_block_against_final(&self, header: &dyn HeaderHandler) -> Result<(), ProcessError> {
        let Some(last) = self.finals.read().get(&header.shard_id()).copied() else {
            return Ok(());
        };

        if header.round() < last.round {
            return Err(ProcessError::LowerRoundInBlock {
                round: header.round(),
                final_round: last.round,
            });
        }
        if header.nonce() < last.nonce {
            return Err(ProcessError::LowerNonceInBlock {
                nonce: header.nonce(),
                final_nonce: last.nonce,
            });
        }

        // at most one block per round
        let round_gap = header.round() - last.round;
        let nonce_gap = header.nonce() - last.nonce;
        if round_gap < nonce_gap {
            return Err(ProcessError::HigherNonceInBlock {
                nonce_gap,
                round_gap,
            });
        }
        Ok(())
    }

    fn check_block_against_rounder(&self, header: &dyn HeaderHandler) -> Result<(), ProcessError> {
        let next_round = self.current_round().saturating_add(1);
        if header.round() > next_round {
            return Err(ProcessError::HigherRoundInBlock {
                round: header.round(),
                next_round,
            });
        }
        Ok(())
    }
}
