//! # Blocks
//!
//! Shard headers, metachain headers and the mini-blocks they reference.
//!
//! Both header kinds implement [`HeaderHandler`] so that signature checks and
//! finality tracking can be written once.

use serde::{Deserialize, Serialize};

use crate::codec::{CodecError, Marshaller};
use crate::shard::{ShardId, METACHAIN_SHARD_ID};
use crate::Hash;

/// Kind of transactions a mini-block carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MiniBlockType {
    /// User transactions.
    #[default]
    Tx,
    /// Protocol reward transactions.
    Reward,
    /// Cross-shard smart-contract results.
    SmartContractResult,
    /// Transactions that failed execution but still pay fees.
    Invalid,
    /// Validator set changes.
    Peer,
}

/// Reference to a mini-block, as carried inside a header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniBlockHeader {
    /// Hash of the referenced mini-block.
    pub hash: Hash,
    /// Shard that produced the mini-block.
    pub sender_shard_id: ShardId,
    /// Shard that executes the mini-block.
    pub receiver_shard_id: ShardId,
    /// Number of transactions inside.
    pub tx_count: u32,
    /// Transaction kind.
    pub kind: MiniBlockType,
}

/// Ordered list of transaction hashes moving between two shards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniBlock {
    pub tx_hashes: Vec<Hash>,
    pub sender_shard_id: ShardId,
    pub receiver_shard_id: ShardId,
    pub kind: MiniBlockType,
}

/// Kind of body a shard header commits to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockBodyType {
    #[default]
    Tx,
    State,
    Smart,
}

/// Shard block header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub nonce: u64,
    pub prev_hash: Hash,
    pub prev_rand_seed: Vec<u8>,
    pub rand_seed: Vec<u8>,
    /// One bit per consensus group member that signed.
    pub pub_keys_bitmap: Vec<u8>,
    pub shard_id: ShardId,
    pub time_stamp: u64,
    pub round: u64,
    pub epoch: u32,
    pub block_body_type: BlockBodyType,
    /// Aggregated committee signature.
    pub signature: Vec<u8>,
    /// Signature of the proposer over the header with this field empty.
    pub leader_signature: Vec<u8>,
    pub mini_block_headers: Vec<MiniBlockHeader>,
    pub root_hash: Hash,
    /// Metachain blocks notarized by this header.
    pub meta_block_hashes: Vec<Hash>,
    pub tx_count: u32,
    pub chain_id: Vec<u8>,
}

/// Per-shard summary notarized by a metachain block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardData {
    pub shard_id: ShardId,
    pub header_hash: Hash,
    pub shard_mini_block_headers: Vec<MiniBlockHeader>,
    pub prev_rand_seed: Vec<u8>,
    pub round: u64,
    pub nonce: u64,
    pub tx_count: u32,
}

/// Validator state transition recorded on the metachain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerAction {
    #[default]
    PeerRegistration,
    PeerUnstaking,
    PeerDeregistration,
    PeerJailed,
}

/// One validator state change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerData {
    pub public_key: Vec<u8>,
    pub action: PeerAction,
    pub time_stamp: u64,
    pub value: u128,
}

/// Metachain block header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBlock {
    pub nonce: u64,
    pub epoch: u32,
    pub round: u64,
    pub time_stamp: u64,
    pub shard_info: Vec<ShardData>,
    pub peer_info: Vec<PeerData>,
    pub signature: Vec<u8>,
    pub leader_signature: Vec<u8>,
    pub pub_keys_bitmap: Vec<u8>,
    pub prev_hash: Hash,
    pub prev_rand_seed: Vec<u8>,
    pub rand_seed: Vec<u8>,
    pub root_hash: Hash,
    pub validator_stats_root_hash: Hash,
    pub mini_block_headers: Vec<MiniBlockHeader>,
    pub tx_count: u32,
    pub chain_id: Vec<u8>,
}

/// Which signature fields are blanked before computing a signing payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScope {
    /// Payload signed by the proposer: leader signature cleared.
    Leader,
    /// Payload signed by the committee: signature, bitmap and leader
    /// signature cleared.
    Committee,
}

/// Read access shared by shard and metachain headers.
pub trait HeaderHandler: Send + Sync {
    fn nonce(&self) -> u64;
    fn round(&self) -> u64;
    fn epoch(&self) -> u32;
    fn shard_id(&self) -> ShardId;
    fn prev_hash(&self) -> &[u8];
    fn prev_rand_seed(&self) -> &[u8];
    fn rand_seed(&self) -> &[u8];
    fn pub_keys_bitmap(&self) -> &[u8];
    fn signature(&self) -> &[u8];
    fn leader_signature(&self) -> &[u8];
    fn root_hash(&self) -> &[u8];
    fn chain_id(&self) -> &[u8];
    fn mini_block_headers(&self) -> &[MiniBlockHeader];

    /// Canonical bytes covered by a signature of the given scope.
    fn signing_bytes(
        &self,
        marshaller: &Marshaller,
        scope: SigningScope,
    ) -> Result<Vec<u8>, CodecError>;
}

macro_rules! impl_header_getters {
    () => {
        fn nonce(&self) -> u64 {
            self.nonce
        }
        fn round(&self) -> u64 {
            self.round
        }
        fn epoch(&self) -> u32 {
            self.epoch
        }
        fn prev_hash(&self) -> &[u8] {
            &self.prev_hash
        }
        fn prev_rand_seed(&self) -> &[u8] {
            &self.prev_rand_seed
        }
        fn rand_seed(&self) -> &[u8] {
            &self.rand_seed
        }
        fn pub_keys_bitmap(&self) -> &[u8] {
            &self.pub_keys_bitmap
        }
        fn signature(&self) -> &[u8] {
            &self.signature
        }
        fn leader_signature(&self) -> &[u8] {
            &self.leader_signature
        }
        fn root_hash(&self) -> &[u8] {
            &self.root_hash
        }
        fn chain_id(&self) -> &[u8] {
            &self.chain_id
        }
        fn mini_block_headers(&self) -> &[MiniBlockHeader] {
            &self.mini_block_headers
        }
        fn signing_bytes(
            &self,
            marshaller: &Marshaller,
            scope: SigningScope,
        ) -> Result<Vec<u8>, CodecError> {
            let mut copy = self.clone();
            copy.leader_signature.clear();
            if scope == SigningScope::Committee {
                copy.signature.clear();
                copy.pub_keys_bitmap.clear();
            }
            marshaller.marshal(&copy)
        }
    };
}

impl HeaderHandler for Header {
    impl_header_getters!();

    fn shard_id(&self) -> ShardId {
        self.shard_id
    }
}

impl HeaderHandler for MetaBlock {
    impl_header_getters!();

    fn shard_id(&self) -> ShardId {
        METACHAIN_SHARD_ID
    }
}
