//! # Domain Layer

pub mod errors;
pub mod headers_pool;
pub mod mini_blocks_pool;
pub mod peer_shard_mapper;
pub mod sharded_cache;
pub mod trie_nodes_pool;

pub use errors::PoolError;
pub use headers_pool::HeadersPool;
pub use mini_blocks_pool::MiniBlocksPool;
pub use peer_shard_mapper::PeerShardMapper;
pub use sharded_cache::{shard_cache_identifier, ShardedDataCache};
pub use trie_nodes_pool::TrieNodesPool;
