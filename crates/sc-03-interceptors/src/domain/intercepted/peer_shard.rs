//! Intercepted peer shard announcement.

use std::sync::Arc;

use shared_types::{is_valid_shard_id, Hash, PeerShard, ShardId, METACHAIN_SHARD_ID};

use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// Text used to announce the metachain.
pub const METACHAIN_LABEL: &str = "META";

/// A peer's claim about the shard it runs in.
#[derive(Debug, Clone)]
pub struct InterceptedPeerShard {
    announced: PeerShard,
    hash: Hash,
    args: Arc<ArgInterceptedDataFactory>,
}

impl InterceptedPeerShard {
    /// Decodes `buff` and derives the hash.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let announced: PeerShard = args.marshaller.unmarshal(buff)?;
        Ok(Self {
            announced,
            hash: args.hasher.compute(buff),
            args,
        })
    }

    /// The announced shard must parse and be in the shard domain.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        self.shard_id().map(|_| ())
    }

    /// Announced shard id.
    pub fn shard_id(&self) -> Result<ShardId, ProcessError> {
        let text = self.announced.shard_id.trim();
        if text.is_empty() {
            return Err(ProcessError::MissingField("shard_id"));
        }
        let shard_id = if text == METACHAIN_LABEL {
            METACHAIN_SHARD_ID
        } else {
            text.parse::<ShardId>()
                .map_err(|_| ProcessError::UnparsableShardId(text.to_string()))?
        };
        if !is_valid_shard_id(shard_id, self.args.shard_coordinator.number_of_shards()) {
            return Err(ProcessError::InvalidShardId(shard_id));
        }
        Ok(shard_id)
    }

    /// Hash of the received bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Always true.
    pub fn is_for_current_shard(&self) -> bool {
        true
    }
}
