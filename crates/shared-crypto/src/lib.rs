//! # Shared Crypto
//!
//! Hashers, single signers and the BLS multisigner used across Shard-Chain.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE3 (XOF), SHA-256, Keccak-256 | Content hashes, key preparation |
//! | `bls` | BLS12-381 `min_sig` | Leader signatures, random seeds |
//! | `multisig` | BLS12-381 aggregation | Committee signatures on headers |
//! | `signatures` | Ed25519 | Transaction signatures |
//!
//! Keys and signatures cross module boundaries as raw bytes tagged by a
//! [`Suite`]; every signer refuses material from another suite.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod errors;
pub mod hashing;
pub mod keys;
pub mod multisig;
pub mod signatures;

// Re-exports
pub use bls::{BlsKeyGenerator, BlsSingleSigner};
pub use errors::CryptoError;
pub use hashing::{Blake3Hasher, Hasher, Keccak256Hasher, Sha256Hasher, DEFAULT_HASH_SIZE};
pub use keys::{KeyGenerator, KeyPair, SingleSigner, Suite};
pub use multisig::{BlsMultiSigner, MultiSigVerifier, KEY_PREPARATION_HASH_SIZE};
pub use signatures::{Ed25519KeyGenerator, Ed25519SingleSigner};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
