//! Ports (hexagonal architecture boundaries) for the interceptors subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::{Interceptor, MessageReceiver};
pub use outbound::{
    AccountsAdapter, AntifloodHandler, BlackListHandler, FeeHandler, HeaderSigVerifier,
    InterceptorThrottler, TopicHandler, ValidityAttester, WhiteListHandler,
};
