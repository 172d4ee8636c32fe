//! # SC-02 Data Pool
//!
//! Shard-local pools that validated gossip objects land in.
//!
//! **Subsystem ID:** 02
//!
//! Every pool is internally synchronized and every insert is idempotent on
//! the object hash, so interceptors may write concurrently without any
//! locking of their own.
//!
//! ## Module Structure
//!
//! ```text
//! sc-02-data-pool/
//! ├── domain/          # Sharded caches, headers, mini-blocks, trie nodes, peer shards
//! └── holder.rs        # PoolsHolder + PoolsConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod holder;

pub use domain::{
    shard_cache_identifier, HeadersPool, MiniBlocksPool, PeerShardMapper, PoolError,
    ShardedDataCache, TrieNodesPool,
};
pub use holder::{PoolsConfig, PoolsHolder};
