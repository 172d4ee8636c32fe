//! # Shard Identifiers
//!
//! A node belongs to exactly one shard or to the metachain. Shard ids are
//! dense in `[0, number_of_shards)`; the metachain and the broadcast
//! destination use sentinel values far outside that range.

/// Identifier of a shard (or one of the sentinels below).
pub type ShardId = u32;

/// Sentinel shard id of the metachain.
pub const METACHAIN_SHARD_ID: ShardId = u32::MAX;

/// Sentinel destination meaning "every shard".
pub const ALL_SHARD_ID: ShardId = 0xFFFF_FFF0;

/// Returns true when `shard_id` names a real shard or the metachain.
///
/// This is the domain every shard id carried by a header must belong to.
pub fn is_valid_shard_id(shard_id: ShardId, number_of_shards: u32) -> bool {
    shard_id < number_of_shards || shard_id == METACHAIN_SHARD_ID
}

/// Renders a shard id for logs and topic suffixes.
pub fn shard_label(shard_id: ShardId) -> String {
    match shard_id {
        METACHAIN_SHARD_ID => "META".to_string(),
        ALL_SHARD_ID => "ALL".to_string(),
        id => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_domain_accepts_shards_and_metachain() {
        assert!(is_valid_shard_id(0, 4));
        assert!(is_valid_shard_id(3, 4));
        assert!(is_valid_shard_id(METACHAIN_SHARD_ID, 4));
    }

    #[test]
    fn test_shard_domain_rejects_out_of_range() {
        assert!(!is_valid_shard_id(4, 4));
        assert!(!is_valid_shard_id(ALL_SHARD_ID, 4));
        assert!(!is_valid_shard_id(METACHAIN_SHARD_ID - 1, 4));
    }

    #[test]
    fn test_shard_label() {
        assert_eq!(shard_label(2), "2");
        assert_eq!(shard_label(METACHAIN_SHARD_ID), "META");
        assert_eq!(shard_label(ALL_SHARD_ID), "ALL");
    }
}
