//! # Canonical Marshaller
//!
//! Every record crossing the network is encoded with one node-wide
//! marshaller. Hashes are always taken over the bytes that were actually
//! received, so the marshaller only has to be deterministic for the data we
//! produce ourselves (signing payloads, batches).

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Encoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value could not be encoded.
    #[error("Marshal failed: {0}")]
    Marshal(String),

    /// The byte stream does not parse into the requested record.
    #[error("Unmarshal failed: {0}")]
    Unmarshal(String),

    /// Zero-length input.
    #[error("Empty buffer")]
    EmptyBuffer,
}

/// Node-wide wire encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marshaller {
    /// Compact binary encoding (default on the wire).
    #[default]
    Bincode,
    /// JSON, used by tooling and some tests.
    Json,
}

impl Marshaller {
    /// Encodes `value`.
    pub fn marshal<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Marshaller::Bincode => {
                bincode::serialize(value).map_err(|e| CodecError::Marshal(e.to_string()))
            }
            Marshaller::Json => {
                serde_json::to_vec(value).map_err(|e| CodecError::Marshal(e.to_string()))
            }
        }
    }

    /// Decodes `buff` into `T`. Empty input is rejected before parsing.
    pub fn unmarshal<T: DeserializeOwned>(&self, buff: &[u8]) -> Result<T, CodecError> {
        if buff.is_empty() {
            return Err(CodecError::EmptyBuffer);
        }
        match self {
            Marshaller::Bincode => {
                bincode::deserialize(buff).map_err(|e| CodecError::Unmarshal(e.to_string()))
            }
            Marshaller::Json => {
                serde_json::from_slice(buff).map_err(|e| CodecError::Unmarshal(e.to_string()))
            }
        }
    }
}
