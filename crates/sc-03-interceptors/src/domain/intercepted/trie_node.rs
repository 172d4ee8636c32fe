//! Intercepted trie node.
//!
//! Trie nodes are requested during state sync and are relevant to any
//! node that asked for them.

use std::sync::Arc;

use shared_types::{Hash, TrieNode};

use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// A decoded trie node; the raw encoding is kept for storage.
#[derive(Debug, Clone)]
pub struct InterceptedTrieNode {
    node: TrieNode,
    encoded: Vec<u8>,
    hash: Hash,
}

impl InterceptedTrieNode {
    /// Keeps the raw node; the hash is its identity.
    pub fn new(buff: &[u8], args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
        let node: TrieNode = args.marshaller.unmarshal(buff)?;
        Ok(Self {
            node,
            encoded: buff.to_vec(),
            hash: args.hasher.compute(buff),
        })
    }

    /// Structural checks of the decoded node.
    pub fn check_validity(&self) -> Result<(), ProcessError> {
        self.node
            .check_structure()
            .map_err(|defect| ProcessError::InvalidTrieNode(format!("{:?}", defect)))
    }

    /// The decoded node.
    pub fn node(&self) -> &TrieNode {
        &self.node
    }

    /// Bytes as received.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Hash of the received bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Always true; the topic already scopes the trie.
    pub fn is_for_current_shard(&self) -> bool {
        true
    }
}
