//! # Shard Assignment Algorithm
//!
//! Address-to-shard mapping by the trailing bytes of the address.
//!
//! The last `n / 256 + 1` bytes are read as a big-endian integer and masked
//! with `2^ceil(log2 n) - 1`. When that lands on a shard that does not exist
//! (shard count not a power of two) the next smaller mask is used instead.
//! Adding a shard therefore only moves addresses out of one shard.

use shared_types::ShardId;

/// Masks for a given shard count.
pub fn compute_masks(number_of_shards: u32) -> (u32, u32) {
    if number_of_shards <= 1 {
        return (0, 0);
    }
    let bits = 32 - (number_of_shards - 1).leading_zeros();
    let high = ((1u64 << bits) - 1) as u32;
    let low = ((1u64 << (bits - 1)) - 1) as u32;
    (high, low)
}

/// Number of trailing address bytes needed to address every shard.
pub fn bytes_needed(number_of_shards: u32) -> usize {
    match number_of_shards {
        0..=256 => 1,
        257..=65_536 => 2,
        65_537..=16_777_216 => 3,
        _ => 4,
    }
}

/// Shard owning `address`.
pub fn assign_shard(address: &[u8], number_of_shards: u32, masks: (u32, u32)) -> ShardId {
    let needed = bytes_needed(number_of_shards);
    let start = address.len().saturating_sub(needed);
    let value = address[start..]
        .iter()
        .fold(0u32, |acc, b| (acc << 8) | u32::from(*b));

    let (high, low) = masks;
    let shard = value & high;
    if shard > number_of_shards.saturating_sub(1) {
        value & low
    } else {
        shard
    }
}
