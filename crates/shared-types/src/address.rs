//! # Addresses
//!
//! Account addresses are fixed-length byte strings, rendered as hex.

use thiserror::Error;

/// Address decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Wrong address length: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Address is not valid hex: {0}")]
    InvalidHex(String),
}

/// Length-checked address conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCodec {
    len: usize,
}

impl AddressCodec {
    /// Default address length (an Ed25519 public key).
    pub const DEFAULT_LEN: usize = 32;

    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks raw address bytes.
    pub fn check(&self, bytes: &[u8]) -> Result<(), AddressError> {
        if bytes.len() != self.len {
            return Err(AddressError::WrongLength {
                expected: self.len,
                actual: bytes.len(),
            });
        }
        Ok(())
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        hex::encode(bytes)
    }

    pub fn decode(&self, text: &str) -> Result<Vec<u8>, AddressError> {
        let bytes = hex::decode(text).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        self.check(&bytes)?;
        Ok(bytes)
    }
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEN)
    }
}
