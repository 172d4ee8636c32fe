//! # Shared Types Crate
//!
//! Wire records and identifiers shared by every Shard-Chain crate.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `shard` | `ShardId`, metachain and broadcast sentinels |
//! | `block` | Shard headers, metachain headers, mini-blocks |
//! | `transaction` | User, reward and smart-contract-result transactions |
//! | `trie` | Trie nodes exchanged during state sync |
//! | `peer` | Peer ids, shard announcements, raw gossip messages |
//! | `batch` | Multi-object messages |
//! | `codec` | The node-wide marshaller |
//! | `address` | Fixed-length address codec |
//! | `account` | Account view used by admission checks |

pub mod account;
pub mod address;
pub mod batch;
pub mod block;
pub mod codec;
pub mod peer;
pub mod shard;
pub mod transaction;
pub mod trie;

pub use account::AccountState;
pub use address::{AddressCodec, AddressError};
pub use batch::Batch;
pub use block::{
    BlockBodyType, Header, HeaderHandler, MetaBlock, MiniBlock, MiniBlockHeader, MiniBlockType,
    PeerAction, PeerData, ShardData, SigningScope,
};
pub use codec::{CodecError, Marshaller};
pub use peer::{P2pMessage, PeerId, PeerShard};
pub use shard::{is_valid_shard_id, shard_label, ShardId, ALL_SHARD_ID, METACHAIN_SHARD_ID};
pub use transaction::{RewardTransaction, SmartContractResult, Transaction, U256};
pub use trie::{TrieNode, TrieNodeDefect};

/// Content hash. Length depends on the configured hasher.
pub type Hash = Vec<u8>;
