//! Inbound (Driving) ports for the interceptors subsystem.
//!
//! The gossip layer drives the subsystem through these traits.

use shared_types::{P2pMessage, PeerId};

use crate::domain::ProcessError;

/// Handler bound to exactly one gossip topic.
pub trait Interceptor: Send + Sync {
    /// Topic this interceptor is registered on.
    fn topic(&self) -> &str;

    /// Runs the admission pipeline on one message.
    ///
    /// `from_connected_peer` is the peer that relayed the message to us,
    /// which may differ from `message.originator`.
    ///
    /// # Returns
    /// - `Ok(())`: accepted, already known, or not addressed to this shard
    /// - `Err`: rejected; the error class tells whether a peer was penalized
    fn process_received_message(
        &self,
        message: &P2pMessage,
        from_connected_peer: &PeerId,
    ) -> Result<(), ProcessError>;
}

/// Topic-keyed entry point used by the transport.
pub trait MessageReceiver: Send + Sync {
    /// Routes `data` received on `topic` to its interceptor.
    fn receive(&self, topic: &str, data: Vec<u8>, from: &PeerId) -> Result<(), ProcessError>;
}
