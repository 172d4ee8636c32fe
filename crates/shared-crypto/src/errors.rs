//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// Malformed-input variants are kept apart from [`CryptoError::AggSigNotValid`]
/// and [`CryptoError::SignatureVerificationFailed`] so callers can tell a
/// broken encoding from a signature that simply does not verify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// No signatures were supplied for aggregation.
    #[error("Empty signature list")]
    EmptySignatureList,

    /// No public keys were supplied.
    #[error("Empty public keys list")]
    EmptyPublicKeys,

    /// A required signature is empty.
    #[error("Nil signature")]
    NilSignature,

    /// A required message is empty.
    #[error("Nil message")]
    NilMessage,

    /// The suite does not match the signer.
    #[error("Invalid suite: expected {expected}, got {actual}")]
    InvalidSuite {
        /// Suite the signer works on
        expected: &'static str,
        /// Suite that was requested
        actual: &'static str,
    },

    /// Signature bytes do not decode to a curve point.
    #[error("Malformed signature encoding")]
    MalformedSignature,

    /// Public key bytes do not decode to a valid key.
    #[error("Malformed public key encoding")]
    MalformedPublicKey,

    /// Private key bytes do not decode to a valid key.
    #[error("Malformed private key encoding")]
    MalformedPrivateKey,

    /// The aggregated signature failed the pairing check.
    #[error("Aggregated signature is not valid")]
    AggSigNotValid,

    /// A single signature failed verification.
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// The key-preparation hasher has the wrong output size.
    #[error("Wrong size hasher: expected {expected} bytes, got {actual}")]
    WrongSizeHasher {
        /// Required output size in bytes
        expected: usize,
        /// Configured output size in bytes
        actual: usize,
    },

    /// Signature and public key lists have different lengths.
    #[error("Signatures ({signatures}) and public keys ({public_keys}) count mismatch")]
    SignaturesPublicKeysMismatch {
        /// Number of signatures
        signatures: usize,
        /// Number of public keys
        public_keys: usize,
    },

    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),
}

impl CryptoError {
    /// True when the input could not even be decoded.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CryptoError::MalformedSignature
                | CryptoError::MalformedPublicKey
                | CryptoError::MalformedPrivateKey
                | CryptoError::NilSignature
                | CryptoError::NilMessage
                | CryptoError::EmptySignatureList
                | CryptoError::EmptyPublicKeys
                | CryptoError::SignaturesPublicKeysMismatch { .. }
        )
    }
}
