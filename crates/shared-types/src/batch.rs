//! # Batches
//!
//! Several marshalled objects packed into one gossip message.

use serde::{Deserialize, Serialize};

/// List of independently decodable payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub data: Vec<Vec<u8>>,
}

impl Batch {
    pub fn new(data: Vec<Vec<u8>>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total payload size, used for antiflood accounting.
    pub fn total_size(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }
}
