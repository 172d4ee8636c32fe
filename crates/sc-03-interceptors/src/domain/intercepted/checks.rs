//! Checks shared by shard and metachain headers.

use shared_types::{is_valid_shard_id, HeaderHandler, MiniBlockHeader, ShardId, METACHAIN_SHARD_ID};
use sc_01_sharding::EpochStartState;

use crate::domain::ProcessError;

/// Rounds after the finality-attesting round during which headers from the
/// previous epoch are still admitted.
pub const EPOCH_CHANGE_GRACE_PERIOD: u64 = 1;

/// Epoch gate applied by metachain nodes to shard headers around an epoch
/// change.
///
/// A header is admitted when any of the following holds:
/// the local node is not the metachain; the epoch start is already attested;
/// the header is in the current epoch or later; the header round is not past
/// the epoch start round; the header round is within the grace period after
/// the finality-attesting round.
pub fn is_epoch_correct(
    self_id: ShardId,
    trigger: &EpochStartState,
    header_epoch: u32,
    header_round: u64,
) -> bool {
    if self_id != METACHAIN_SHARD_ID {
        return true;
    }
    if trigger.start_round >= trigger.finality_attesting_round {
        return true;
    }
    if header_epoch >= trigger.epoch {
        return true;
    }
    if header_round <= trigger.start_round {
        return true;
    }
    header_round <= trigger.finality_attesting_round.saturating_add(EPOCH_CHANGE_GRACE_PERIOD)
}

/// Rejects headers with an empty mandatory field.
pub fn check_header_fields(header: &dyn HeaderHandler) -> Result<(), ProcessError> {
    let fields: [(&'static str, &[u8]); 7] = [
        ("pub_keys_bitmap", header.pub_keys_bitmap()),
        ("prev_hash", header.prev_hash()),
        ("signature", header.signature()),
        ("root_hash", header.root_hash()),
        ("rand_seed", header.rand_seed()),
        ("prev_rand_seed", header.prev_rand_seed()),
        ("leader_signature", header.leader_signature()),
    ];
    for (name, value) in fields {
        if value.is_empty() {
            return Err(ProcessError::MissingField(name));
        }
    }
    Ok(())
}

/// Both ends of every mini-block header must be in the shard domain.
pub fn check_mini_block_headers(
    headers: &[MiniBlockHeader],
    number_of_shards: u32,
) -> Result<(), ProcessError> {
    for mbh in headers {
        if !is_valid_shard_id(mbh.sender_shard_id, number_of_shards) {
            return Err(ProcessError::InvalidShardId(mbh.sender_shard_id));
        }
        if !is_valid_shard_id(mbh.receiver_shard_id, number_of_shards) {
            return Err(ProcessError::InvalidShardId(mbh.receiver_shard_id));
        }
    }
    Ok(())
}

/// The declared chain id must equal ours.
pub fn check_chain_id(expected: &[u8], actual: &[u8]) -> Result<(), ProcessError> {
    if expected != actual {
        return Err(ProcessError::ChainIdMismatch);
    }
    Ok(())
}
