//! # SC-03 Interceptors
//!
//! Admission control for everything peers gossip to this node.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Every gossip topic the node listens on is bound to an interceptor. An
//! interceptor decodes the payload into an intercepted object, runs its
//! structural and cryptographic checks, drops it if it concerns another
//! shard and was not requested, and otherwise hands it to a processor that stores it in the
//! shard-local pool. Peers relaying forged or malformed data are
//! blacklisted.
//!
//! ## Error Classes
//!
//! | Class | Effect |
//! |-------|--------|
//! | Configuration | The container is not built; the node must not start |
//! | Structural | The message is dropped |
//! | Trust | The message is dropped and the relaying peers are blacklisted |
//!
//! ## Module Structure
//!
//! ```text
//! sc-03-interceptors/
//! ├── domain/
//! │   ├── intercepted/     # The eight intercepted-data variants + shared checks
//! │   ├── factories.rs     # Bytes -> intercepted data, one factory per variant
//! │   ├── validators.rs    # TxValidator, HeaderValidator, NilValidator
//! │   ├── processors.rs    # Pool writers
//! │   └── errors.rs        # ProcessError + ErrorClass
//! ├── ports/               # Interceptor, MessageReceiver, outbound capabilities
//! ├── adapters/            # Antiflood, throttler, whitelist, BLS header verifier, in-memory stand-ins
//! ├── interceptors/        # Single and batch interceptors
//! ├── container_factory/   # Shard and metachain topic wiring
//! ├── service.rs           # InterceptorsContainer
//! ├── config.rs            # InterceptorsConfig
//! └── metrics.rs           # Prometheus counters (feature `metrics`)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod container_factory;
pub mod domain;
pub mod interceptors;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    BlockSigVerifier, EconomicsFeeHandler, FinalHeaderTracker, InMemoryAccounts,
    InMemoryMessenger, NumThreadsThrottler, P2pAntiflood, QuotaFloodPreventer,
    RequestedDataWhiteList, TimeCache,
};
pub use config::{AntifloodConfig, EconomicsConfig, InterceptorsConfig};
pub use container_factory::{
    ArgInterceptorsContainerFactory, MetaInterceptorsContainerFactory,
    ShardInterceptorsContainerFactory,
};
pub use domain::{
    ArgInterceptedDataFactory, DataKind, ErrorClass, InterceptedData, InterceptedDataFactory,
    InterceptionDebugger, ProcessError,
};
pub use interceptors::{MultiDataInterceptor, SingleDataInterceptor};
pub use ports::{Interceptor, MessageReceiver};
pub use service::InterceptorsContainer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
