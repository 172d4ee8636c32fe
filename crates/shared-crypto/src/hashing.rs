//! # Hashers
//!
//! Every hash in the node goes through a [`Hasher`]. The output size is part
//! of the hasher's identity: the BLS multisigner, for example, only accepts a
//! 16-byte hasher for key preparation.

use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Default hash output size.
pub const DEFAULT_HASH_SIZE: usize = 32;

/// One-shot hash function with a fixed output size.
pub trait Hasher: Send + Sync {
    /// Hash `data`. The result is always `size()` bytes long.
    fn compute(&self, data: &[u8]) -> Vec<u8>;

    /// Output size in bytes.
    fn size(&self) -> usize;
}

/// BLAKE3 with a configurable output length (extendable output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blake3Hasher {
    size: usize,
}

impl Blake3Hasher {
    /// Create a hasher producing `size` bytes.
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_SIZE)
    }
}

impl Hasher for Blake3Hasher {
    fn compute(&self, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.size];
        let mut hasher = blake3::Hasher::new();
        hasher.update(data);
        hasher.finalize_xof().fill(&mut out);
        out
    }

    fn size(&self) -> usize {
        self.size
    }
}

/// SHA-256.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn compute(&self, data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }

    fn size(&self) -> usize {
        32
    }
}

/// Keccak-256 (pre-standard SHA-3 padding).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl Hasher for Keccak256Hasher {
    fn compute(&self, data: &[u8]) -> Vec<u8> {
        Keccak256::digest(data).to_vec()
    }

    fn size(&self) -> usize {
        32
    }
}
