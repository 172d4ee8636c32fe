//! # Keys and Signer Seams
//!
//! Key material travels as raw bytes so that one pipeline can hold signers
//! for different curves. Each signer declares its [`Suite`] and rejects
//! material belonging to another one.

use zeroize::Zeroizing;

use crate::CryptoError;

/// Signature scheme a key or signer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suite {
    /// BLS over BLS12-381, signatures on G1, public keys on G2.
    Bls12381,
    /// Ed25519.
    Ed25519,
}

impl Suite {
    /// Stable name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Suite::Bls12381 => "BLS12-381",
            Suite::Ed25519 => "Ed25519",
        }
    }

    /// Fails with [`CryptoError::InvalidSuite`] unless `self == expected`.
    pub fn ensure(&self, expected: Suite) -> Result<(), CryptoError> {
        if *self != expected {
            return Err(CryptoError::InvalidSuite {
                expected: expected.as_str(),
                actual: self.as_str(),
            });
        }
        Ok(())
    }
}

/// A generated key pair. The secret half is wiped on drop.
pub struct KeyPair {
    /// Serialized secret key
    pub secret: Zeroizing<Vec<u8>>,
    /// Serialized public key
    pub public: Vec<u8>,
}

/// Produces and validates keys of one suite.
pub trait KeyGenerator: Send + Sync {
    /// Suite of the produced keys.
    fn suite(&self) -> Suite;

    /// Checks that `public_key` decodes to a valid key of this suite.
    fn check_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError>;

    /// Generates a fresh random key pair.
    fn generate_pair(&self) -> Result<KeyPair, CryptoError>;
}

/// Signs and verifies single signatures.
pub trait SingleSigner: Send + Sync {
    /// Suite of the accepted keys.
    fn suite(&self) -> Suite;

    /// Signs `message` with the serialized secret key.
    fn sign(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Verifies `signature` over `message` for the serialized public key.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8])
        -> Result<(), CryptoError>;
}
