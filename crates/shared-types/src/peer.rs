//! # Peers
//!
//! Peer identities as seen by the gossip layer, plus the shard
//! announcements peers broadcast about themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a network peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub Vec<u8>);

impl PeerId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

/// Announcement of the shard a peer operates in.
///
/// The shard id travels as text so that the metachain can be announced
/// without depending on the numeric sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerShard {
    pub shard_id: String,
}

/// Raw message handed over by the gossip layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct P2pMessage {
    pub topic: String,
    pub data: Vec<u8>,
    /// Peer that created the message (may differ from the relaying peer).
    pub originator: PeerId,
    pub seq_no: u64,
}

impl P2pMessage {
    pub fn new(topic: impl Into<String>, data: Vec<u8>, originator: PeerId) -> Self {
        Self {
            topic: topic.into(),
            data,
            originator,
            seq_no: 0,
        }
    }
}
