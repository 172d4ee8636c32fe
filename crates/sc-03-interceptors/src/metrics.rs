//! # Interceptor Metrics
//!
//! Prometheus metrics for the admission pipeline.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! sc-03-interceptors = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `interceptors_messages_received_total` - Counter of received objects (by topic)
//! - `interceptors_messages_accepted_total` - Counter of objects stored in a pool (by topic)
//! - `interceptors_messages_rejected_total` - Counter of rejected objects (by error class)
//! - `interceptors_peers_blacklisted_total` - Counter of peer penalties
//! - `interceptors_in_flight` - Gauge of messages currently being processed

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Received objects, labeled by topic
    pub static ref MESSAGES_RECEIVED: IntCounterVec = register_int_counter_vec!(
        "interceptors_messages_received_total",
        "Total number of intercepted objects received",
        &["topic"]
    )
    .expect("Failed to create MESSAGES_RECEIVED metric");

    /// Objects stored, labeled by topic
    pub static ref MESSAGES_ACCEPTED: IntCounterVec = register_int_counter_vec!(
        "interceptors_messages_accepted_total",
        "Total number of intercepted objects stored in a pool",
        &["topic"]
    )
    .expect("Failed to create MESSAGES_ACCEPTED metric");

    /// Rejected objects, labeled by error class
    pub static ref MESSAGES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "interceptors_messages_rejected_total",
        "Total number of intercepted objects rejected",
        &["class"]
    )
    .expect("Failed to create MESSAGES_REJECTED metric");

    /// Peers penalized
    pub static ref PEERS_BLACKLISTED: IntCounter = register_int_counter!(
        "interceptors_peers_blacklisted_total",
        "Total number of peer blacklistings"
    )
    .expect("Failed to create PEERS_BLACKLISTED metric");

    /// Messages in flight
    pub static ref IN_FLIGHT: IntGauge = register_int_gauge!(
        "interceptors_in_flight",
        "Messages currently being processed"
    )
    .expect("Failed to create IN_FLIGHT metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record objects received on a topic
#[cfg(feature = "metrics")]
pub fn record_received(topic: &str, count: u64) {
    MESSAGES_RECEIVED.with_label_values(&[topic]).inc_by(count);
}

/// Record an object stored in a pool
#[cfg(feature = "metrics")]
pub fn record_accepted(topic: &str) {
    MESSAGES_ACCEPTED.with_label_values(&[topic]).inc();
}

/// Record a rejection
#[cfg(feature = "metrics")]
pub fn record_rejected(class: &str) {
    MESSAGES_REJECTED.with_label_values(&[class]).inc();
}

/// Record a peer penalty
#[cfg(feature = "metrics")]
pub fn record_peer_blacklisted() {
    PEERS_BLACKLISTED.inc();
}

/// Update the in-flight gauge
#[cfg(feature = "metrics")]
pub fn set_in_flight(count: u32) {
    IN_FLIGHT.set(i64::from(count));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_received(_topic: &str, _count: u64) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_accepted(_topic: &str) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_rejected(_class: &str) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_peer_blacklisted() {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn set_in_flight(_count: u32) {}
