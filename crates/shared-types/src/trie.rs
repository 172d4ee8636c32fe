//! # Trie Nodes
//!
//! Nodes of the account and validator Patricia-Merkle tries, gossiped while
//! a node syncs state.

use serde::{Deserialize, Serialize};

use crate::Hash;

/// Number of children of a branch node (one per nibble plus terminator).
pub const BRANCH_CHILDREN: usize = 17;

/// Structural defects found in a decoded trie node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieNodeDefect {
    EmptyKey,
    EmptyValue,
    EmptyChild,
    WrongChildrenCount(usize),
    NoChildren,
}

/// A Patricia-Merkle trie node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrieNode {
    Leaf { key: Vec<u8>, value: Vec<u8> },
    Extension { key: Vec<u8>, child: Hash },
    /// `children[i]` is empty when there is no child at that nibble.
    Branch { children: Vec<Hash> },
}

impl TrieNode {
    /// Structural sanity of a decoded node.
    pub fn check_structure(&self) -> Result<(), TrieNodeDefect> {
        match self {
            TrieNode::Leaf { key, value } => {
                if key.is_empty() {
                    return Err(TrieNodeDefect::EmptyKey);
                }
                if value.is_empty() {
                    return Err(TrieNodeDefect::EmptyValue);
                }
                Ok(())
            }
            TrieNode::Extension { key, child } => {
                if key.is_empty() {
                    return Err(TrieNodeDefect::EmptyKey);
                }
                if child.is_empty() {
                    return Err(TrieNodeDefect::EmptyChild);
                }
                Ok(())
            }
            TrieNode::Branch { children } => {
                if children.len() != BRANCH_CHILDREN {
                    return Err(TrieNodeDefect::WrongChildrenCount(children.len()));
                }
                if children.iter().all(|c| c.is_empty()) {
                    return Err(TrieNodeDefect::NoChildren);
                }
                Ok(())
            }
        }
    }
}
