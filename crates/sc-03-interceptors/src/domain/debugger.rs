//! # Interception Debugger
//!
//! Per-topic counters of what happened to received messages, and per-peer
//! rejection counts. Cheap enough to stay enabled in production.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::PeerId;

use crate::domain::errors::ErrorClass;

/// Counters for one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicCounters {
    /// Elements that passed the antiflood gates.
    pub received: u64,
    /// Newly stored.
    pub accepted: u64,
    /// Already in the pool.
    pub duplicated: u64,
    /// Valid but addressed to another shard.
    pub not_for_shard: u64,
    /// Dropped without a peer penalty, including antiflood refusals.
    pub rejected_structural: u64,
    /// Dropped and the sender blacklisted.
    pub rejected_trust: u64,
}

/// Observes interceptor outcomes.
#[derive(Debug, Default)]
pub struct InterceptionDebugger {
    topics: RwLock<HashMap<String, TopicCounters>>,
    peer_rejections: RwLock<HashMap<PeerId, u64>>,
}

impl InterceptionDebugger {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, topic: &str, f: impl FnOnce(&mut TopicCounters)) {
        let mut topics = self.topics.write();
        f(topics.entry(topic.to_string()).or_default());
    }

    /// `count` elements entered processing on `topic`.
    pub fn record_received(&self, topic: &str, count: u64) {
        self.update(topic, |c| c.received += count);
    }

    /// `newly_added` is false for objects already in the pool.
    pub fn record_accepted(&self, topic: &str, newly_added: bool) {
        self.update(topic, |c| {
            if newly_added {
                c.accepted += 1;
            } else {
                c.duplicated += 1;
            }
        });
    }

    /// One valid object was dropped as foreign.
    pub fn record_not_for_shard(&self, topic: &str) {
        self.update(topic, |c| c.not_for_shard += 1);
    }

    /// Counts the rejection on the topic by `class`, and against `peer`.
    pub fn record_rejected(&self, topic: &str, peer: &PeerId, class: ErrorClass) {
        self.update(topic, |c| match class {
            ErrorClass::Trust => c.rejected_trust += 1,
            _ => c.rejected_structural += 1,
        });
        *self.peer_rejections.write().entry(peer.clone()).or_default() += 1;
    }

    /// Snapshot of one topic's counters.
    pub fn topic(&self, topic: &str) -> TopicCounters {
        self.topics.read().get(topic).copied().unwrap_or_default()
    }

    /// Rejections attributed to `peer`.
    pub fn rejections_of(&self, peer: &PeerId) -> u64 {
        self.peer_rejections.read().get(peer).copied().unwrap_or(0)
    }
}
