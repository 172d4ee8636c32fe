//! # Ed25519 Signatures
//!
//! Transaction signatures. A sender's address is its Ed25519 public key, so
//! verifying a transaction needs nothing beyond the transaction itself.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

use crate::keys::{KeyGenerator, KeyPair, SingleSigner, Suite};
use crate::CryptoError;

/// Public key size.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Signature size.
pub const SIGNATURE_SIZE: usize = 64;

fn verifying_key(bytes: &[u8]) -> Result<VerifyingKey, CryptoError> {
    let arr: [u8; PUBLIC_KEY_SIZE] = bytes
        .try_into()
        .map_err(|_| CryptoError::MalformedPublicKey)?;
    VerifyingKey::from_bytes(&arr).map_err(|_| CryptoError::MalformedPublicKey)
}

fn signing_key(bytes: &[u8]) -> Result<SigningKey, CryptoError> {
    let seed: Zeroizing<[u8; 32]> = Zeroizing::new(
        bytes
            .try_into()
            .map_err(|_| CryptoError::MalformedPrivateKey)?,
    );
    Ok(SigningKey::from_bytes(&seed))
}

/// Ed25519 key generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519KeyGenerator;

impl Ed25519KeyGenerator {
    /// Creates a key pair from a 32-byte secret seed.
    pub fn pair_from_seed(&self, seed: [u8; 32]) -> KeyPair {
        let signing_key = SigningKey::from_bytes(&seed);
        KeyPair {
            secret: Zeroizing::new(signing_key.to_bytes().to_vec()),
            public: signing_key.verifying_key().to_bytes().to_vec(),
        }
    }
}

impl KeyGenerator for Ed25519KeyGenerator {
    fn suite(&self) -> Suite {
        Suite::Ed25519
    }

    fn check_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError> {
        verifying_key(public_key).map(|_| ())
    }

    fn generate_pair(&self) -> Result<KeyPair, CryptoError> {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Ok(KeyPair {
            secret: Zeroizing::new(signing_key.to_bytes().to_vec()),
            public: signing_key.verifying_key().to_bytes().to_vec(),
        })
    }
}

/// Ed25519 signer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519SingleSigner;

impl SingleSigner for Ed25519SingleSigner {
    fn suite(&self) -> Suite {
        Suite::Ed25519
    }

    fn sign(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = signing_key(secret_key)?;
        Ok(key.sign(message).to_bytes().to_vec())
    }

    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        if signature.is_empty() {
            return Err(CryptoError::NilSignature);
        }
        let key = verifying_key(public_key)?;
        let sig = ed25519_dalek::Signature::from_slice(signature)
            .map_err(|_| CryptoError::MalformedSignature)?;
        key.verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}
