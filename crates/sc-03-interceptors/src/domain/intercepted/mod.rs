//! # Intercepted Data
//!
//! Decoded wire objects wrapped with their content hash and relevance to
//! the local shard. The variant set is closed, so the pipeline dispatches
//! with a `match` rather than through trait objects.
//!
//! Construction only decodes and derives routing data; it never checks
//! signatures. `check_validity` does the expensive work and is only called
//! once the antiflood and throttling gates have passed.

pub mod checks;
pub mod header;
pub mod meta_header;
pub mod mini_block;
pub mod peer_shard;
pub mod reward;
pub mod transaction;
pub mod trie_node;
pub mod unsigned;

pub use checks::{is_epoch_correct, EPOCH_CHANGE_GRACE_PERIOD};
pub use header::InterceptedHeader;
pub use meta_header::InterceptedMetaHeader;
pub use mini_block::InterceptedMiniBlock;
pub use peer_shard::InterceptedPeerShard;
pub use reward::InterceptedRewardTransaction;
pub use transaction::InterceptedTransaction;
pub use trie_node::InterceptedTrieNode;
pub use unsigned::InterceptedUnsignedTransaction;

use crate::domain::ProcessError;

/// Kind of an intercepted object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Shard block header.
    ShardHeader,
    /// Metachain block header.
    MetaHeader,
    /// User transaction.
    Transaction,
    /// Reward from the metachain.
    RewardTransaction,
    /// Smart contract result.
    UnsignedTransaction,
    /// Mini-block.
    MiniBlock,
    /// State trie node.
    TrieNode,
    /// Peer shard announcement.
    PeerShard,
}

impl DataKind {
    /// Name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::ShardHeader => "intercepted header",
            DataKind::MetaHeader => "intercepted meta header",
            DataKind::Transaction => "intercepted tx",
            DataKind::RewardTransaction => "intercepted reward tx",
            DataKind::UnsignedTransaction => "intercepted unsigned tx",
            DataKind::MiniBlock => "intercepted miniblock",
            DataKind::TrieNode => "intercepted trie node",
            DataKind::PeerShard => "intercepted peer shard",
        }
    }
}

/// Any object received on a gossip topic.
#[derive(Debug, Clone)]
pub enum InterceptedData {
    /// See [`DataKind::ShardHeader`].
    ShardHeader(InterceptedHeader),
    /// See [`DataKind::MetaHeader`].
    MetaHeader(InterceptedMetaHeader),
    /// See [`DataKind::Transaction`].
    Transaction(InterceptedTransaction),
    /// See [`DataKind::RewardTransaction`].
    RewardTransaction(InterceptedRewardTransaction),
    /// See [`DataKind::UnsignedTransaction`].
    UnsignedTransaction(InterceptedUnsignedTransaction),
    /// See [`DataKind::MiniBlock`].
    MiniBlock(InterceptedMiniBlock),
    /// See [`DataKind::TrieNode`].
    TrieNode(InterceptedTrieNode),
    /// See [`DataKind::PeerShard`].
    PeerShard(InterceptedPeerShard),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            InterceptedData::ShardHeader($inner) => $body,
            InterceptedData::MetaHeader($inner) => $body,
            InterceptedData::Transaction($inner) => $body,
            InterceptedData::RewardTransaction($inner) => $body,
            InterceptedData::UnsignedTransaction($inner) => $body,
            InterceptedData::MiniBlock($inner) => $body,
            InterceptedData::TrieNode($inner) => $body,
            InterceptedData::PeerShard($inner) => $body,
        }
    };
}

impl InterceptedData {
    /// Hash of the raw bytes the object was decoded from.
    pub fn hash(&self) -> &[u8] {
        dispatch!(self, inner => inner.hash())
    }

    /// True when the local shard should keep the object.
    pub fn is_for_current_shard(&self) -> bool {
        dispatch!(self, inner => inner.is_for_current_shard())
    }

    /// Structural and cryptographic checks.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        dispatch!(self, inner => inner.check_validity())
    }

    /// Variant tag.
    pub fn kind(&self) -> DataKind {
        match self {
            InterceptedData::ShardHeader(_) => DataKind::ShardHeader,
            InterceptedData::MetaHeader(_) => DataKind::MetaHeader,
            InterceptedData::Transaction(_) => DataKind::Transaction,
            InterceptedData::RewardTransaction(_) => DataKind::RewardTransaction,
            InterceptedData::UnsignedTransaction(_) => DataKind::UnsignedTransaction,
            InterceptedData::MiniBlock(_) => DataKind::MiniBlock,
            InterceptedData::TrieNode(_) => DataKind::TrieNode,
            InterceptedData::PeerShard(_) => DataKind::PeerShard,
        }
    }

    /// Name used in logs.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arguments::fixtures::args;
    use shared_types::{Marshaller, MiniBlock};

    #[test]
    fn test_dispatch() {
        let buff = Marshaller::default()
            .marshal(&MiniBlock {
                sender_shard_id: 0,
                receiver_shard_id: 1,
                ..Default::default()
            })
            .unwrap();
        let args = args(2, 1);
        let data = InterceptedData::MiniBlock(InterceptedMiniBlock::new(&buff, args.clone()).unwrap());
        assert_eq!(data.kind(), DataKind::MiniBlock);
        assert_eq!(data.type_name(), "intercepted miniblock");
        assert_eq!(data.hash(), args.hasher.compute(&buff).as_slice());
        assert!(data.is_for_current_shard());
        assert!(data.check_validity().is_ok());
    }
}
