//! Outbound (Driven) ports for the interceptors subsystem.
//!
//! Collaborators the pipeline consults while admitting a message. All are
//! shared between interceptors and must tolerate concurrent calls.

use std::sync::Arc;
use std::time::Duration;

use shared_types::{AccountState, HeaderHandler, P2pMessage, PeerId, Transaction};

use crate::domain::intercepted::InterceptedData;
use crate::domain::ProcessError;
use crate::ports::inbound::Interceptor;

/// Per-peer flood protection and peer penalties.
pub trait AntifloodHandler: Send + Sync {
    /// Checks the per-peer message quota for one incoming message.
    fn can_process_message(&self, message: &P2pMessage, from: &PeerId) -> Result<(), ProcessError>;

    /// Checks the per-topic quota for `num_messages` messages of `total_size` bytes.
    fn can_process_messages_on_topic(
        &self,
        peer: &PeerId,
        topic: &str,
        num_messages: u32,
        total_size: u64,
    ) -> Result<(), ProcessError>;

    /// Refuses traffic from `peer` for `duration`.
    fn blacklist_peer(&self, peer: &PeerId, reason: &str, duration: Duration);

    /// True while `peer` is blacklisted.
    fn is_blacklisted(&self, peer: &PeerId) -> bool;

    /// Refuses originators that may not publish on `topic`, such as
    /// non-validators on a validators-only topic.
    fn is_originator_eligible_for_topic(
        &self,
        originator: &PeerId,
        topic: &str,
    ) -> Result<(), ProcessError>;
}

/// Hashes of data this node asked for.
///
/// Requested data bypasses the originator eligibility check and the shard
/// filter.
pub trait WhiteListHandler: Send + Sync {
    /// Whitelists `keys` for the handler's configured span.
    fn add(&self, keys: &[Vec<u8>]);

    /// Drops `keys` once the data has arrived.
    fn remove(&self, keys: &[Vec<u8>]);

    /// True when the hash of `data` was requested.
    fn is_white_listed(&self, data: &InterceptedData) -> bool;
}

/// Bounded concurrency across all interceptors.
pub trait InterceptorThrottler: Send + Sync {
    /// True when another message may start processing.
    fn can_process(&self) -> bool;

    /// Marks one message as in flight.
    fn start_processing(&self);

    /// Releases one in-flight slot.
    fn end_processing(&self);
}

/// Anti-rollback checks against the local view of the chain.
pub trait ValidityAttester: Send + Sync {
    /// Compares the header with the last final header of its shard.
    fn check_block_against_final(&self, header: &dyn HeaderHandler) -> Result<(), ProcessError>;

    /// Compares the header round with the local round clock.
    fn check_block_against_rounder(&self, header: &dyn HeaderHandler) -> Result<(), ProcessError>;
}

/// Transaction economics.
pub trait FeeHandler: Send + Sync {
    /// Checks gas price and gas limit against the economic minimums.
    fn check_validity_tx_values(&self, tx: &Transaction) -> Result<(), ProcessError>;
}

/// Read access to the local account state.
pub trait AccountsAdapter: Send + Sync {
    /// Account at `address`, if it exists in this shard.
    fn get_existing_account(&self, address: &[u8]) -> Option<AccountState>;
}

/// Gossip topic registration, implemented by the messenger.
pub trait TopicHandler: Send + Sync {
    /// Creates `name` if missing.
    fn create_topic(&self, name: &str, create_channel: bool) -> Result<(), String>;

    /// True when the topic exists.
    fn has_topic(&self, name: &str) -> bool;

    /// Binds `processor` to `topic`. At most one processor per topic.
    fn register_message_processor(
        &self,
        topic: &str,
        processor: Arc<dyn Interceptor>,
    ) -> Result<(), String>;

    /// Removes the processor bound to `topic`, if any.
    fn unregister_message_processor(&self, topic: &str) -> Result<(), String>;
}

/// Rand seed, leader and committee signature checks for headers.
pub trait HeaderSigVerifier: Send + Sync {
    /// Verifies the rand seed and the leader signature against the
    /// round's proposer.
    fn verify_rand_seed_and_leader_signature(
        &self,
        header: &dyn HeaderHandler,
    ) -> Result<(), ProcessError>;

    /// Verifies the aggregated committee signature.
    fn verify_signature(&self, header: &dyn HeaderHandler) -> Result<(), ProcessError>;
}

/// Set of keys (header hashes) known to be bad.
pub trait BlackListHandler: Send + Sync {
    /// Adds `key` for the handler's configured span.
    fn add(&self, key: &[u8]);

    /// True while `key` is listed.
    fn has(&self, key: &[u8]) -> bool;
}
