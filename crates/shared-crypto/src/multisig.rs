//! # BLS Multisignatures
//!
//! Committee signatures are aggregated after each public key and each
//! signature share is scaled by a per-key coefficient
//! `t_i = H(pk_i)`, with `H` a 16-byte hasher. The coefficient is placed in
//! the low-order half of a 32-byte big-endian scalar. Scaling binds every
//! share to its own key and rules out rogue-key cancellation.
//!
//! Verification is a single fast-aggregate pairing check of the aggregated
//! signature against the scaled public keys.

use std::sync::Arc;

use blst::min_sig::{AggregateSignature, PublicKey, Signature};
use blst::BLST_ERROR;

use crate::bls::{self, DST};
use crate::hashing::Hasher;
use crate::keys::Suite;
use crate::CryptoError;

/// Output size the key-preparation hasher must have.
pub const KEY_PREPARATION_HASH_SIZE: usize = 16;

/// Aggregated-signature verification as seen by header checks.
pub trait MultiSigVerifier: Send + Sync {
    /// Suite the verifier operates on.
    fn suite(&self) -> Suite;

    /// Verifies `agg_sig` over `message` for the given signer keys.
    fn verify_aggregated_sig(
        &self,
        suite: Suite,
        public_keys: &[Vec<u8>],
        agg_sig: &[u8],
        message: &[u8],
    ) -> Result<(), CryptoError>;
}

/// BLS multisigner over BLS12-381.
pub struct BlsMultiSigner {
    hasher: Arc<dyn Hasher>,
}

impl std::fmt::Debug for BlsMultiSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlsMultiSigner")
            .field("hasher_size", &self.hasher.size())
            .finish()
    }
}

impl BlsMultiSigner {
    /// Creates the multisigner.
    ///
    /// # Errors
    /// * `WrongSizeHasher` unless the hasher outputs exactly 16 bytes
    pub fn new(hasher: Arc<dyn Hasher>) -> Result<Self, CryptoError> {
        if hasher.size() != KEY_PREPARATION_HASH_SIZE {
            return Err(CryptoError::WrongSizeHasher {
                expected: KEY_PREPARATION_HASH_SIZE,
                actual: hasher.size(),
            });
        }
        Ok(Self { hasher })
    }

    /// Signs `message` with an unscaled share. Scaling happens at aggregation.
    pub fn sign_share(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if message.is_empty() {
            return Err(CryptoError::NilMessage);
        }
        let sk = bls::parse_secret_key(secret_key)?;
        Ok(sk.sign(message, DST, &[]).to_bytes().to_vec())
    }

    /// Verifies one unscaled share.
    pub fn verify_sig_share(
        &self,
        public_key: &[u8],
        message: &[u8],
        share: &[u8],
    ) -> Result<(), CryptoError> {
        self.verify_sig_bytes(share)?;
        if message.is_empty() {
            return Err(CryptoError::NilMessage);
        }
        let pk = bls::parse_public_key(public_key)?;
        let sig = bls::parse_signature(share)?;
        match sig.verify(true, message, DST, &[], &pk, false) {
            BLST_ERROR::BLST_SUCCESS => Ok(()),
            _ => Err(CryptoError::SignatureVerificationFailed),
        }
    }

    /// Checks that `sig` decodes to a G1 point.
    pub fn verify_sig_bytes(&self, sig: &[u8]) -> Result<(), CryptoError> {
        bls::parse_signature(sig).map(|_| ())
    }

    /// Aggregates signature shares, scaling each by its signer's coefficient.
    ///
    /// `signatures[i]` must have been produced by `public_keys[i]`.
    pub fn aggregate_signatures(
        &self,
        suite: Suite,
        signatures: &[Vec<u8>],
        public_keys: &[Vec<u8>],
    ) -> Result<Vec<u8>, CryptoError> {
        suite.ensure(Suite::Bls12381)?;
        if signatures.is_empty() {
            return Err(CryptoError::EmptySignatureList);
        }
        if public_keys.is_empty() {
            return Err(CryptoError::EmptyPublicKeys);
        }
        if signatures.len() != public_keys.len() {
            return Err(CryptoError::SignaturesPublicKeysMismatch {
                signatures: signatures.len(),
                public_keys: public_keys.len(),
            });
        }

        let scaled = signatures
            .iter()
            .zip(public_keys)
            .map(|(sig, pk)| {
                let sig = bls::parse_signature(sig)?;
                let pk = bls::parse_public_key(pk)?;
                bls::mul_signature(&sig, &self.coefficient(&pk))
            })
            .collect::<Result<Vec<Signature>, CryptoError>>()?;

        let refs: Vec<&Signature> = scaled.iter().collect();
        let aggregate =
            AggregateSignature::aggregate(&refs, false).map_err(|_| CryptoError::MalformedSignature)?;
        Ok(aggregate.to_signature().to_bytes().to_vec())
    }

    /// Verifies an aggregated signature against the scaled signer keys.
    pub fn verify_aggregated_sig(
        &self,
        suite: Suite,
        public_keys: &[Vec<u8>],
        agg_sig: &[u8],
        message: &[u8],
    ) -> Result<(), CryptoError> {
        suite.ensure(Suite::Bls12381)?;
        if public_keys.is_empty() {
            return Err(CryptoError::EmptyPublicKeys);
        }
        if message.is_empty() {
            return Err(CryptoError::NilMessage);
        }
        let sig = bls::parse_signature(agg_sig)?;
        let prepared = self.prepare_public_keys(public_keys)?;
        let refs: Vec<&PublicKey> = prepared.iter().collect();

        match sig.fast_aggregate_verify(true, message, DST, &refs) {
            BLST_ERROR::BLST_SUCCESS => Ok(()),
            _ => Err(CryptoError::AggSigNotValid),
        }
    }

    /// `t_i * pk_i` for every key.
    pub fn prepare_public_keys(&self, public_keys: &[Vec<u8>]) -> Result<Vec<PublicKey>, CryptoError> {
        public_keys
            .iter()
            .map(|bytes| {
                let pk = bls::parse_public_key(bytes)?;
                bls::mul_public_key(&pk, &self.coefficient(&pk))
            })
            .collect()
    }

    /// Hash of the compressed key, right-aligned in a zeroed 32-byte scalar.
    fn coefficient(&self, pk: &PublicKey) -> [u8; 32] {
        let digest = self.hasher.compute(&pk.to_bytes());
        let mut scalar = [0u8; 32];
        let start = 32 - digest.len().min(32);
        scalar[start..].copy_from_slice(&digest[..32 - start]);
        scalar
    }
}

impl MultiSigVerifier for BlsMultiSigner {
    fn suite(&self) -> Suite {
        Suite::Bls12381
    }

    fn verify_aggregated_sig(
        &self,
        suite: Suite,
        public_keys: &[Vec<u8>],
        agg_sig: &[u8],
        message: &[u8],
    ) -> Result<(), CryptoError> {
        BlsMultiSigner::verify_aggregated_sig(self, suite, public_keys, agg_sig, message)
    }
}
