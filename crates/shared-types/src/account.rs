//! # Accounts

use serde::{Deserialize, Serialize};

use crate::transaction::U256;

/// Minimal account view needed for admission checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub nonce: u64,
    pub balance: U256,
}

impl AccountState {
    pub fn new(nonce: u64, balance: U256) -> Self {
        Self { nonce, balance }
    }
}
