//! # BLS Signatures (BLS12-381)
//!
//! Single BLS signatures and the curve helpers used by the multisigner.
//!
//! Uses blst's `min_sig` variant: signatures are G1 points (48 bytes
//! compressed) and public keys are G2 points (96 bytes compressed).

use blst::min_sig::{PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::keys::{KeyGenerator, KeyPair, SingleSigner, Suite};
use crate::CryptoError;

/// Hash-to-curve domain separation tag (signatures on G1).
pub const DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Compressed signature size.
pub const SIGNATURE_SIZE: usize = 48;

/// Compressed public key size.
pub const PUBLIC_KEY_SIZE: usize = 96;

/// Secret key size.
pub const SECRET_KEY_SIZE: usize = 32;

pub(crate) fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    let pk = PublicKey::from_bytes(bytes).map_err(|_| CryptoError::MalformedPublicKey)?;
    pk.validate().map_err(|_| CryptoError::MalformedPublicKey)?;
    Ok(pk)
}

pub(crate) fn parse_signature(bytes: &[u8]) -> Result<Signature, CryptoError> {
    if bytes.is_empty() {
        return Err(CryptoError::NilSignature);
    }
    Signature::from_bytes(bytes).map_err(|_| CryptoError::MalformedSignature)
}

pub(crate) fn parse_secret_key(bytes: &[u8]) -> Result<SecretKey, CryptoError> {
    SecretKey::from_bytes(bytes).map_err(|_| CryptoError::MalformedPrivateKey)
}

/// Builds a 256-bit scalar from big-endian bytes.
fn scalar_from_be(be: &[u8; 32]) -> blst::blst_scalar {
    let mut scalar = blst::blst_scalar::default();
    // SAFETY: `be` is exactly 32 bytes, the size blst reads.
    unsafe { blst::blst_scalar_from_bendian(&mut scalar, be.as_ptr()) };
    scalar
}

/// Returns `k * pk` on G2.
pub(crate) fn mul_public_key(pk: &PublicKey, k: &[u8; 32]) -> Result<PublicKey, CryptoError> {
    let scalar = scalar_from_be(k);
    let serialized = pk.serialize();
    let mut affine = blst::blst_p2_affine::default();
    let mut point = blst::blst_p2::default();
    let mut compressed = [0u8; PUBLIC_KEY_SIZE];
    // SAFETY: all buffers have the sizes blst expects: `serialized` is a
    // 192-byte uncompressed G2 point, `compressed` holds 96 bytes and the
    // scalar is 256 bits.
    unsafe {
        if blst::blst_p2_deserialize(&mut affine, serialized.as_ptr()) != BLST_ERROR::BLST_SUCCESS
        {
            return Err(CryptoError::MalformedPublicKey);
        }
        blst::blst_p2_from_affine(&mut point, &affine);
        let mut product = blst::blst_p2::default();
        blst::blst_p2_mult(&mut product, &point, scalar.b.as_ptr(), 256);
        blst::blst_p2_compress(compressed.as_mut_ptr(), &product);
    }
    PublicKey::from_bytes(&compressed).map_err(|_| CryptoError::MalformedPublicKey)
}

/// Returns `k * sig` on G1.
pub(crate) fn mul_signature(sig: &Signature, k: &[u8; 32]) -> Result<Signature, CryptoError> {
    let scalar = scalar_from_be(k);
    let serialized = sig.serialize();
    let mut affine = blst::blst_p1_affine::default();
    let mut point = blst::blst_p1::default();
    let mut compressed = [0u8; SIGNATURE_SIZE];
    // SAFETY: `serialized` is a 96-byte uncompressed G1 point, `compressed`
    // holds 48 bytes and the scalar is 256 bits.
    unsafe {
        if blst::blst_p1_deserialize(&mut affine, serialized.as_ptr()) != BLST_ERROR::BLST_SUCCESS
        {
            return Err(CryptoError::MalformedSignature);
        }
        blst::blst_p1_from_affine(&mut point, &affine);
        let mut product = blst::blst_p1::default();
        blst::blst_p1_mult(&mut product, &point, scalar.b.as_ptr(), 256);
        blst::blst_p1_compress(compressed.as_mut_ptr(), &product);
    }
    Signature::from_bytes(&compressed).map_err(|_| CryptoError::MalformedSignature)
}

/// BLS key generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlsKeyGenerator;

impl BlsKeyGenerator {
    /// Derives a key pair from 32 bytes of input key material.
    pub fn pair_from_seed(&self, ikm: &[u8; 32]) -> Result<KeyPair, CryptoError> {
        let sk = SecretKey::key_gen(ikm, &[])
            .map_err(|e| CryptoError::KeyGenerationFailed(format!("{:?}", e)))?;
        Ok(KeyPair {
            secret: Zeroizing::new(sk.to_bytes().to_vec()),
            public: sk.sk_to_pk().to_bytes().to_vec(),
        })
    }
}

impl KeyGenerator for BlsKeyGenerator {
    fn suite(&self) -> Suite {
        Suite::Bls12381
    }

    fn check_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError> {
        parse_public_key(public_key).map(|_| ())
    }

    fn generate_pair(&self) -> Result<KeyPair, CryptoError> {
        let mut ikm = Zeroizing::new([0u8; 32]);
        rand::thread_rng().fill_bytes(&mut *ikm);
        self.pair_from_seed(&ikm)
    }
}

/// Single BLS signer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlsSingleSigner;

impl SingleSigner for BlsSingleSigner {
    fn suite(&self) -> Suite {
        Suite::Bls12381
    }

    fn sign(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if message.is_empty() {
            return Err(CryptoError::NilMessage);
        }
        let sk = parse_secret_key(secret_key)?;
        Ok(sk.sign(message, DST, &[]).to_bytes().to_vec())
    }

    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        if message.is_empty() {
            return Err(CryptoError::NilMessage);
        }
        let pk = parse_public_key(public_key)?;
        let sig = parse_signature(signature)?;
        match sig.verify(true, message, DST, &[], &pk, false) {
            BLST_ERROR::BLST_SUCCESS => Ok(()),
            _ => Err(CryptoError::SignatureVerificationFailed),
        }
    }
}
