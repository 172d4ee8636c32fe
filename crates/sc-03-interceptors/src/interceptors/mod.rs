//! # Interceptors
//!
//! Per-topic admission pipeline:
//!
//! ```text
//! antiflood ──▶ throttler ──▶ decode ──▶ check_validity ──▶ relevance ──▶ validate ──▶ save
//!                               │              │                │
//!                          blacklist?      blacklist on      drop silently
//!                                          trust failure
//! ```
//!
//! [`SingleDataInterceptor`] handles topics carrying one object per
//! message; [`MultiDataInterceptor`] handles batches, where every element
//! is judged on its own.

pub mod multi;
pub mod pipeline;
pub mod single;

pub use multi::MultiDataInterceptor;
pub use pipeline::{ArgInterceptor, PenaltyPolicy};
pub use single::SingleDataInterceptor;
