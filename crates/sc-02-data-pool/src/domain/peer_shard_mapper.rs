//! # Peer Shard Mapper
//!
//! Last announced shard of every peer, used to route requests.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::{PeerId, ShardId};

/// Peer to shard mapping.
#[derive(Debug, Default)]
pub struct PeerShardMapper {
    shards: RwLock<HashMap<PeerId, ShardId>>,
}

impl PeerShardMapper {
    /// Creates an empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the shard a peer announced.
    pub fn update_peer_shard(&self, peer: PeerId, shard_id: ShardId) {
        self.shards.write().insert(peer, shard_id);
    }

    /// Last announced shard of `peer`.
    pub fn shard_of(&self, peer: &PeerId) -> Option<ShardId> {
        self.shards.read().get(peer).copied()
    }

    /// Peers announced in `shard_id`.
    pub fn peers_in_shard(&self, shard_id: ShardId) -> Vec<PeerId> {
        let mut peers: Vec<PeerId> = self
            .shards
            .read()
            .iter()
            .filter(|(_, s)| **s == shard_id)
            .map(|(p, _)| p.clone())
            .collect();
        peers.sort();
        peers
    }
}
