//! # Pool Errors

use thiserror::Error;

/// Data pool errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The pool reached its configured capacity.
    #[error("Pool full: {pool} holds {capacity} entries")]
    PoolFull {
        /// Pool name
        pool: &'static str,
        /// Configured capacity
        capacity: usize,
    },

    /// A capacity of zero was configured.
    #[error("Invalid capacity for {0}")]
    InvalidCapacity(&'static str),
}
