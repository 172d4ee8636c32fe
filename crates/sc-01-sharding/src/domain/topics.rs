//! # Topic Names
//!
//! A topic is `<category><communication identifier>`, for example
//! `transactions_0_1` or `shardBlocks_2_META`.

/// User transactions.
pub const TRANSACTIONS: &str = "transactions";

/// Cross-shard smart-contract results.
pub const UNSIGNED_TRANSACTIONS: &str = "unsignedTransactions";

/// Reward transactions.
pub const REWARDS_TRANSACTIONS: &str = "rewardsTransactions";

/// Shard block headers.
pub const SHARD_BLOCKS: &str = "shardBlocks";

/// Mini-blocks.
pub const MINI_BLOCKS: &str = "miniBlocks";

/// Metachain block headers. Published without an identifier suffix.
pub const METACHAIN_BLOCKS: &str = "metachainBlocks";

/// Account trie nodes.
pub const ACCOUNT_TRIE_NODES: &str = "accountTrieNodes";

/// Validator trie nodes.
pub const VALIDATOR_TRIE_NODES: &str = "validatorTrieNodes";

/// Peer shard announcements.
pub const PEER_SHARD: &str = "peerShard";

/// Joins a category with a communication identifier.
pub fn topic_name(category: &str, identifier: &str) -> String {
    format!("{}{}", category, identifier)
}
