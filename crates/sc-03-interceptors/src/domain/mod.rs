//! Domain layer for the interceptors subsystem.

pub mod arguments;
pub mod debugger;
pub mod errors;
pub mod factories;
pub mod intercepted;
pub mod processors;
pub mod validators;

pub use arguments::{ArgInterceptedDataFactory, ArgInterceptedDataFactoryBuilder};
pub use debugger::{InterceptionDebugger, TopicCounters};
pub use errors::{ErrorClass, ProcessError};
pub use factories::{
    InterceptedDataFactory, MetaHeaderDataFactory, MiniBlockDataFactory, PeerShardDataFactory,
    RewardTxDataFactory, ShardHeaderDataFactory, TrieNodeDataFactory, TxDataFactory,
    UnsignedTxDataFactory,
};
pub use intercepted::{DataKind, InterceptedData};
pub use processors::{
    HdrInterceptorProcessor, InterceptorProcessor, MiniBlockInterceptorProcessor,
    PeerShardInterceptorProcessor, TrieNodeInterceptorProcessor, TxInterceptorProcessor, TxPool,
};
pub use validators::{
    DataValidator, HeaderValidator, NilValidator, TxValidator, MAX_TX_NONCE_DELTA_ALLOWED,
};
