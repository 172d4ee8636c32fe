//! In-memory account state.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::AccountState;

use crate::ports::AccountsAdapter;

/// Account map used by light deployments and tests.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    accounts: RwLock<HashMap<Vec<u8>, AccountState>>,
}

impl InMemoryAccounts {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or overwrites the account at `address`.
    pub fn set_account(&self, address: Vec<u8>, state: AccountState) {
        self.accounts.write().insert(address, state);
    }
}

impl AccountsAdapter for InMemoryAccounts {
    fn get_existing_account(&self, address: &[u8]) -> Option<AccountState> {
        self.accounts.read().get(address).cloned()
    }
}
