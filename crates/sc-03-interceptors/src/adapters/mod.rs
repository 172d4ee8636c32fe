//! Adapters implementing the outbound ports.

pub mod accounts;
pub mod antiflood;
pub mod block_tracker;
pub mod fee;
pub mod header_sig_verifier;
pub mod messenger;
pub mod throttler;
pub mod whitelist;

pub use accounts::InMemoryAccounts;
pub use antiflood::{P2pAntiflood, QuotaFloodPreventer, TimeCache};
pub use block_tracker::FinalHeaderTracker;
pub use fee::EconomicsFeeHandler;
pub use header_sig_verifier::{min_consensus_size, BlockSigVerifier};
pub use messenger::InMemoryMessenger;
pub use throttler::{NumThreadsThrottler, ThrottleGuard};
pub use whitelist::RequestedDataWhiteList;
