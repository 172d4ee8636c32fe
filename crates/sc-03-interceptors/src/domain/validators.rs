//! # Data Validators
//!
//! Checks against local state, applied by processors after the object
//! itself was found valid. Unlike `check_validity`, a validator failure
//! never penalizes the sender: the object may be fine and simply not
//! acceptable to us yet.

use std::sync::Arc;

use shared_types::HeaderHandler;
use sc_01_sharding::{EpochStartTrigger, ShardCoordinator};

use crate::domain::intercepted::InterceptedData;
use crate::domain::ProcessError;
use crate::ports::AccountsAdapter;

/// Highest accepted distance between a transaction nonce and the account
/// nonce.
pub const MAX_TX_NONCE_DELTA_ALLOWED: u64 = 15_000;

/// Nonce window and balance check for transactions sent from this shard.
pub struct TxValidator {
    accounts: Arc<dyn AccountsAdapter>,
    shard_coordinator: Arc<dyn ShardCoordinator>,
    max_nonce_delta_allowed: u64,
}

impl TxValidator {
    /// Nonces further than `max_nonce_delta_allowed` ahead of the account
    /// are refused.
    pub fn new(
        accounts: Arc<dyn AccountsAdapter>,
        shard_coordinator: Arc<dyn ShardCoordinator>,
        max_nonce_delta_allowed: u64,
    ) -> Self {
        Self {
            accounts,
            shard_coordinator,
            max_nonce_delta_allowed,
        }
    }

    /// Transactions from other shards are deferred to their own shard.
    pub fn check(&self, data: &InterceptedData) -> Result<(), ProcessError> {
        let InterceptedData::Transaction(intercepted) = data else {
            return Err(ProcessError::WrongTypeAssertion);
        };
        if intercepted.snd_shard() != self.shard_coordinator.self_id() {
            return Ok(());
        }

        let tx = intercepted.transaction();
        let account = self
            .accounts
            .get_existing_account(&tx.snd_addr)
            .ok_or(ProcessError::AccountNotFound)?;

        if tx.nonce < account.nonce {
            return Err(ProcessError::NonceTooLow {
                tx_nonce: tx.nonce,
                account_nonce: account.nonce,
            });
        }
        let max_allowed = account.nonce.saturating_add(self.max_nonce_delta_allowed);
        if tx.nonce > max_allowed {
            return Err(ProcessError::NonceTooHigh {
                tx_nonce: tx.nonce,
                max_allowed,
            });
        }
        if account.balance < tx.max_fee() {
            return Err(ProcessError::InsufficientBalance);
        }
        Ok(())
    }
}

/// Rejects headers more than one epoch behind.
pub struct HeaderValidator {
    epoch_start_trigger: Arc<dyn EpochStartTrigger>,
}

impl HeaderValidator {
    /// Compares against the epoch reported by `epoch_start_trigger`.
    pub fn new(epoch_start_trigger: Arc<dyn EpochStartTrigger>) -> Self {
        Self {
            epoch_start_trigger,
        }
    }

    /// Shard and metachain headers only.
    pub fn check(&self, data: &InterceptedData) -> Result<(), ProcessError> {
        let header: &dyn HeaderHandler = match data {
            InterceptedData::ShardHeader(h) => h.header(),
            InterceptedData::MetaHeader(h) => h.header(),
            _ => return Err(ProcessError::WrongTypeAssertion),
        };
        let current = self.epoch_start_trigger.epoch();
        if header.epoch().saturating_add(1) < current {
            return Err(ProcessError::StaleEpoch {
                header_epoch: header.epoch(),
                current,
            });
        }
        Ok(())
    }
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NilValidator;

/// Validator bound to a processor.
pub enum DataValidator {
    /// Nonce and balance checks.
    Tx(TxValidator),
    /// Stale epoch check.
    Header(HeaderValidator),
    /// No checks.
    Nil(NilValidator),
}

impl DataValidator {
    /// Runs the wrapped validator.
    pub fn validate(&self, data: &InterceptedData) -> Result<(), ProcessError> {
        match self {
            DataValidator::Tx(v) => v.check(data),
            DataValidator::Header(v) => v.check(data),
            DataValidator::Nil(_) => Ok(()),
        }
    }
}
