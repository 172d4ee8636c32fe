//! # Domain Errors
//!
//! Every failure is one of three classes with its own propagation policy:
//!
//! | Class | Examples | Consequence |
//! |-------|----------|-------------|
//! | Configuration | missing dependency, bad chain id, wrong-size hasher | node does not start |
//! | Structural | decode failure, missing field, bad shard id, nonce | message dropped |
//! | Trust | bad signature, chain id mismatch, malformed signature | message dropped, peer blacklisted |

use shared_crypto::CryptoError;
use shared_types::{AddressError, CodecError, ShardId};
use sc_01_sharding::ShardingError;
use sc_02_data_pool::PoolError;
use thiserror::Error;

/// Propagation class of a [`ProcessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Fatal at startup.
    Configuration,
    /// Local to one message, no peer penalty.
    Structural,
    /// Local to one message, originating peer is blacklisted.
    Trust,
}

impl ErrorClass {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Configuration => "configuration",
            ErrorClass::Structural => "structural",
            ErrorClass::Trust => "trust",
        }
    }
}

/// Interceptor pipeline errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    // ---- configuration -------------------------------------------------

    /// A collaborator was not provided.
    #[error("Missing dependency: {0}")]
    MissingDependency(&'static str),

    /// Chain id is empty.
    #[error("Invalid chain id")]
    InvalidChainId,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Key generator and signer disagree on the suite.
    #[error("Suite mismatch in {0}")]
    SuiteMismatch(&'static str),

    /// The multisigner could not be built.
    #[error("Invalid multisigner: {0}")]
    InvalidMultiSigner(CryptoError),

    /// Topic creation or processor registration failed.
    #[error("Topic registration failed for {topic}: {reason}")]
    TopicRegistration {
        /// Topic name
        topic: String,
        /// Failure reported by the topic handler
        reason: String,
    },

    /// Topic already has an interceptor.
    #[error("Container key already exists: {0}")]
    ContainerKeyAlreadyExists(String),

    /// Keys and interceptors lists differ in length.
    #[error("Keys ({keys}) and interceptors ({interceptors}) length mismatch")]
    LenMismatch {
        /// Number of keys
        keys: usize,
        /// Number of interceptors
        interceptors: usize,
    },

    // ---- structural ----------------------------------------------------

    /// No interceptor for the topic.
    #[error("Invalid container key: {0}")]
    InvalidContainerKey(String),

    /// The payload does not decode.
    #[error("Decode failed: {0}")]
    Decode(#[from] CodecError),

    /// A batch message carried no elements.
    #[error("No data in message")]
    NoDataInMessage,

    /// A required field is empty.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Shard id outside the valid domain.
    #[error("Invalid shard id: {0}")]
    InvalidShardId(ShardId),

    /// Announced shard id does not parse.
    #[error("Unparsable shard id: {0}")]
    UnparsableShardId(String),

    /// Header epoch is behind the epoch-start trigger.
    #[error("Epoch does not match: header epoch {header_epoch}, round {round}")]
    EpochDoesNotMatch {
        /// Header epoch
        header_epoch: u32,
        /// Header round
        round: u64,
    },

    /// Header is older than one epoch behind the current one.
    #[error("Stale epoch: header epoch {header_epoch}, current {current}")]
    StaleEpoch {
        /// Header epoch
        header_epoch: u32,
        /// Current epoch
        current: u32,
    },

    /// Header round precedes the final header round.
    #[error("Lower round in block: {round} < final {final_round}")]
    LowerRoundInBlock {
        /// Header round
        round: u64,
        /// Final header round
        final_round: u64,
    },

    /// Header nonce precedes the final header nonce.
    #[error("Lower nonce in block: {nonce} < final {final_nonce}")]
    LowerNonceInBlock {
        /// Header nonce
        nonce: u64,
        /// Final header nonce
        final_nonce: u64,
    },

    /// More nonces than rounds elapsed since the final header.
    #[error("Higher nonce in block: nonce gap {nonce_gap} > round gap {round_gap}")]
    HigherNonceInBlock {
        /// Nonce distance to final
        nonce_gap: u64,
        /// Round distance to final
        round_gap: u64,
    },

    /// Header round is ahead of the local clock.
    #[error("Higher round in block: {round} > next round {next_round}")]
    HigherRoundInBlock {
        /// Header round
        round: u64,
        /// Next local round
        next_round: u64,
    },

    /// Header hash was blacklisted earlier.
    #[error("Header is blacklisted")]
    HeaderIsBlacklisted,

    /// Sender address invalid.
    #[error("Invalid sender address: {0}")]
    InvalidSndAddr(AddressError),

    /// Receiver address invalid.
    #[error("Invalid receiver address: {0}")]
    InvalidRcvAddr(AddressError),

    /// Gas price under the minimum.
    #[error("Insufficient gas price: {provided} < {minimum}")]
    InsufficientGasPrice {
        /// Provided gas price
        provided: u64,
        /// Minimum gas price
        minimum: u64,
    },

    /// Gas limit under the minimum for the payload.
    #[error("Insufficient gas limit: {provided} < {required}")]
    InsufficientGasLimit {
        /// Provided gas limit
        provided: u64,
        /// Required gas limit
        required: u64,
    },

    /// Sender account is not in this shard.
    #[error("Address not present in this shard")]
    AccountNotFound,

    /// Transaction nonce below the account nonce.
    #[error("Nonce too low: tx {tx_nonce} < account {account_nonce}")]
    NonceTooLow {
        /// Transaction nonce
        tx_nonce: u64,
        /// Account nonce
        account_nonce: u64,
    },

    /// Transaction nonce too far ahead of the account nonce.
    #[error("Nonce too high: tx {tx_nonce} > max allowed {max_allowed}")]
    NonceTooHigh {
        /// Transaction nonce
        tx_nonce: u64,
        /// Highest accepted nonce
        max_allowed: u64,
    },

    /// Balance does not cover the declared fee.
    #[error("Insufficient balance for fee")]
    InsufficientBalance,

    /// Trie node failed its structure check.
    #[error("Invalid trie node: {0}")]
    InvalidTrieNode(String),

    /// Processor received a variant it does not handle.
    #[error("Wrong type assertion")]
    WrongTypeAssertion,

    /// Destination pool refused the object.
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    /// Committee lookup failed.
    #[error("Sharding error: {0}")]
    Sharding(#[from] ShardingError),

    /// Shared processing capacity is exhausted.
    #[error("System busy")]
    SystemBusy,

    /// Antiflood quota exceeded.
    #[error("Antiflood rejected message: {0}")]
    Antiflood(String),

    /// The originating or relaying peer is blacklisted.
    #[error("Peer is blacklisted: {0}")]
    PeerBlacklisted(String),

    /// The originator may not publish on a validators-only topic.
    #[error("Originator {originator} not eligible for topic {topic}")]
    OriginatorNotEligible {
        /// Peer that created the message.
        originator: String,
        /// Restricted topic.
        topic: String,
    },

    // ---- trust ---------------------------------------------------------

    /// Declared chain id differs from ours.
    #[error("Chain id mismatch")]
    ChainIdMismatch,

    /// Signature-level failure.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Bitmap length does not fit the consensus group.
    #[error("Wrong size bitmap: expected {expected} bytes, got {actual}")]
    WrongSizeBitmap {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Too few committee members signed.
    #[error("Not enough signatures: {signed} < {required}")]
    NotEnoughSignatures {
        /// Signers in bitmap
        signed: usize,
        /// Minimum consensus
        required: usize,
    },

    /// The leader is not among the signers.
    #[error("Block proposer signature missing from bitmap")]
    ProposerSignatureMissing,
}

impl ProcessError {
    /// Propagation class of this error.
    pub fn class(&self) -> ErrorClass {
        use ProcessError::*;
        match self {
            MissingDependency(_)
            | InvalidChainId
            | InvalidConfig(_)
            | SuiteMismatch(_)
            | InvalidMultiSigner(_)
            | TopicRegistration { .. }
            | ContainerKeyAlreadyExists(_)
            | LenMismatch { .. } => ErrorClass::Configuration,

            ChainIdMismatch
            | Crypto(_)
            | WrongSizeBitmap { .. }
            | NotEnoughSignatures { .. }
            | ProposerSignatureMissing => ErrorClass::Trust,

            _ => ErrorClass::Structural,
        }
    }

    /// True when the sender should be blacklisted.
    pub fn is_trust_failure(&self) -> bool {
        self.class() == ErrorClass::Trust
    }
}
