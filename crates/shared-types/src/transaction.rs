//! # Transactions
//!
//! User transactions are signed by the sender. Reward transactions and
//! smart-contract results are produced by the protocol itself and carry no
//! signature.

use serde::{Deserialize, Serialize};

pub use primitive_types::U256;

use crate::codec::{CodecError, Marshaller};
use crate::shard::ShardId;
use crate::Hash;

/// A user-signed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub nonce: u64,
    pub value: U256,
    pub rcv_addr: Vec<u8>,
    /// Sender address; also the sender's Ed25519 public key.
    pub snd_addr: Vec<u8>,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub data: Vec<u8>,
    pub chain_id: Vec<u8>,
    pub signature: Vec<u8>,
}

impl Transaction {
    /// Bytes the sender signs: the transaction with its signature cleared.
    pub fn signing_bytes(&self, marshaller: &Marshaller) -> Result<Vec<u8>, CodecError> {
        let mut copy = self.clone();
        copy.signature.clear();
        marshaller.marshal(&copy)
    }

    /// Maximum fee the sender commits to (`gas_price * gas_limit`).
    pub fn max_fee(&self) -> U256 {
        U256::from(self.gas_price).saturating_mul(U256::from(self.gas_limit))
    }
}

/// Block reward paid by the metachain to a validator account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTransaction {
    pub round: u64,
    pub epoch: u32,
    pub value: U256,
    pub rcv_addr: Vec<u8>,
    /// Shard the reward is destined to.
    pub shard_id: ShardId,
}

/// Outcome of a cross-shard smart-contract call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractResult {
    pub nonce: u64,
    pub value: U256,
    pub rcv_addr: Vec<u8>,
    pub snd_addr: Vec<u8>,
    pub code: Vec<u8>,
    pub data: Vec<u8>,
    pub prev_tx_hash: Hash,
    pub original_tx_hash: Hash,
    pub gas_limit: u64,
    pub gas_price: u64,
    pub call_type: u8,
}
