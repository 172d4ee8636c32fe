//! Economics fee handler.

use shared_types::Transaction;

use crate::config::EconomicsConfig;
use crate::domain::ProcessError;
use crate::ports::FeeHandler;

/// Minimum gas price, and a minimum gas limit growing with the payload.
#[derive(Debug, Clone)]
pub struct EconomicsFeeHandler {
    min_gas_price: u64,
    min_gas_limit: u64,
    gas_per_data_byte: u64,
}

impl EconomicsFeeHandler {
    /// Minimums taken from `config`.
    pub fn new(config: &EconomicsConfig) -> Self {
        Self {
            min_gas_price: config.min_gas_price,
            min_gas_limit: config.min_gas_limit,
            gas_per_data_byte: config.gas_per_data_byte,
        }
    }

    /// Gas needed to carry `data_len` payload bytes.
    pub fn compute_gas_limit(&self, data_len: usize) -> u64 {
        self.min_gas_limit
            .saturating_add(self.gas_per_data_byte.saturating_mul(data_len as u64))
    }
}

impl FeeHandler for EconomicsFeeHandler {
    fn check_validity_tx_values(&self, tx: &Transaction) -> Result<(), ProcessError> {
        if tx.gas_price < self.min_gas_price {
            return Err(ProcessError::InsufficientGasPrice {
                provided: tx.gas_price,
                minimum: self.min_gas_price,
            });
        }
        let required = self.compute_gas_limit(tx.data.len());
        if tx.gas_limit < required {
            return Err(ProcessError::InsufficientGasLimit {
                provided: tx.gas_limit,
                required,
            });
        }
        Ok(())
    }
}
