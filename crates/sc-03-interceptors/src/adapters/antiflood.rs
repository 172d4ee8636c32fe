//! # Antiflood
//!
//! Per-peer and global message quotas, a per-topic quota, and a timed
//! peer blacklist. Quotas are counted until [`P2pAntiflood::reset`], which
//! the node calls on a fixed interval.
//!
//! Some topics only accept messages originated by current validators; the
//! validator set is pushed in by the node on every epoch change.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use shared_types::{P2pMessage, PeerId};
use tracing::{debug, warn};

use crate::config::AntifloodConfig;
use crate::domain::ProcessError;
use crate::metrics;
use crate::ports::{AntifloodHandler, BlackListHandler};

/// Keys with an expiry.
#[derive(Debug)]
pub struct TimeCache<K> {
    default_span: Duration,
    entries: RwLock<HashMap<K, Instant>>,
}

impl<K: Eq + Hash + Clone> TimeCache<K> {
    /// Empty cache; `default_span` applies to keys added without a span.
    pub fn new(default_span: Duration) -> Self {
        Self {
            default_span,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Adds or extends `key` for `span`.
    pub fn upsert(&self, key: K, span: Duration) {
        let expiry = Instant::now() + span;
        let mut entries = self.entries.write();
        let slot = entries.entry(key).or_insert(expiry);
        if *slot < expiry {
            *slot = expiry;
        }
    }

    /// True while `key` has not expired.
    pub fn contains(&self, key: &K) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|expiry| *expiry > Instant::now())
    }

    /// Forgets `key` before it expires.
    pub fn remove(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Drops expired keys.
    pub fn sweep(&self) {
        let now = Instant::now();
        self.entries.write().retain(|_, expiry| *expiry > now);
    }

    /// Keys held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when no keys are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlackListHandler for TimeCache<Vec<u8>> {
    fn add(&self, key: &[u8]) {
        self.upsert(key.to_vec(), self.default_span);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.contains(&key.to_vec())
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Quota {
    messages: u32,
    size: u64,
}

/// Counts messages and bytes per peer and in total.
#[derive(Debug)]
pub struct QuotaFloodPreventer {
    peer_max_messages: u32,
    peer_max_size: u64,
    global_max_messages: u32,
    global_max_size: u64,
    state: Mutex<(Quota, HashMap<PeerId, Quota>)>,
}

impl QuotaFloodPreventer {
    /// Fails when either message quota is zero.
    pub fn new(
        peer_max_messages: u32,
        peer_max_size: u64,
        global_max_messages: u32,
        global_max_size: u64,
    ) -> Result<Self, ProcessError> {
        if peer_max_messages == 0 || global_max_messages == 0 {
            return Err(ProcessError::InvalidConfig("antiflood message quota is zero".into()));
        }
        Ok(Self {
            peer_max_messages,
            peer_max_size,
            global_max_messages,
            global_max_size,
            state: Mutex::new((Quota::default(), HashMap::new())),
        })
    }

    /// Accounts one message of `size` bytes from `peer`.
    ///
    /// The global quota is checked first; exhausting it reports
    /// `SystemBusy` rather than blaming the peer.
    pub fn increase_load(&self, peer: &PeerId, size: u64) -> Result<(), ProcessError> {
        let mut guard = self.state.lock();
        let (global, peers) = &mut *guard;

        global.messages = global.messages.saturating_add(1);
        global.size = global.size.saturating_add(size);
        if global.messages > self.global_max_messages || global.size > self.global_max_size {
            return Err(ProcessError::SystemBusy);
        }

        let quota = peers.entry(peer.clone()).or_default();
        quota.messages = quota.messages.saturating_add(1);
        quota.size = quota.size.saturating_add(size);
        if quota.messages > self.peer_max_messages || quota.size > self.peer_max_size {
            return Err(ProcessError::Antiflood(format!(
                "peer {} quota exceeded: {} messages, {} bytes",
                peer, quota.messages, quota.size
            )));
        }
        Ok(())
    }

    /// Starts a new interval.
    pub fn reset(&self) {
        let mut guard = self.state.lock();
        guard.0 = Quota::default();
        guard.1.clear();
    }
}

/// Antiflood handler combining the quota preventer, a per-topic quota and
/// a peer blacklist.
#[derive(Debug)]
pub struct P2pAntiflood {
    preventer: QuotaFloodPreventer,
    topic_max_messages: u32,
    topic_counts: Mutex<HashMap<(PeerId, String), u32>>,
    blacklist: TimeCache<PeerId>,
    validators_only_topics: RwLock<HashSet<String>>,
    validators: RwLock<HashSet<PeerId>>,
}

impl P2pAntiflood {
    /// Handler with an empty blacklist and no restricted topics.
    pub fn new(preventer: QuotaFloodPreventer, topic_max_messages: u32) -> Self {
        Self {
            preventer,
            topic_max_messages,
            topic_counts: Mutex::new(HashMap::new()),
            blacklist: TimeCache::new(Duration::from_secs(3_600)),
            validators_only_topics: RwLock::new(HashSet::new()),
            validators: RwLock::new(HashSet::new()),
        }
    }

    /// Builds the preventer and topic quota from `config`.
    pub fn from_config(config: &AntifloodConfig) -> Result<Self, ProcessError> {
        let preventer = QuotaFloodPreventer::new(
            config.peer_max_messages,
            config.peer_max_total_size,
            config.global_max_messages,
            config.global_max_total_size,
        )?;
        if config.topic_max_messages_per_peer == 0 {
            return Err(ProcessError::InvalidConfig("topic quota is zero".into()));
        }
        Ok(Self::new(preventer, config.topic_max_messages_per_peer))
    }

    /// Restricts `topic` to messages originated by validators.
    pub fn set_topic_for_validators_only(&self, topic: &str) {
        self.validators_only_topics.write().insert(topic.to_string());
    }

    /// Replaces the validator set.
    pub fn set_validators(&self, peers: impl IntoIterator<Item = PeerId>) {
        *self.validators.write() = peers.into_iter().collect();
    }

    /// Starts a new quota interval and forgets expired penalties.
    pub fn reset(&self) {
        self.preventer.reset();
        self.topic_counts.lock().clear();
        self.blacklist.sweep();
    }
}

impl AntifloodHandler for P2pAntiflood {
    fn can_process_message(&self, message: &P2pMessage, from: &PeerId) -> Result<(), ProcessError> {
        for peer in [from, &message.originator] {
            if self.blacklist.contains(peer) {
                return Err(ProcessError::PeerBlacklisted(peer.to_string()));
            }
        }
        self.preventer.increase_load(from, message.data.len() as u64)
    }

    fn can_process_messages_on_topic(
        &self,
        peer: &PeerId,
        topic: &str,
        num_messages: u32,
        _total_size: u64,
    ) -> Result<(), ProcessError> {
        let mut counts = self.topic_counts.lock();
        let count = counts.entry((peer.clone(), topic.to_string())).or_default();
        *count = count.saturating_add(num_messages);
        if *count > self.topic_max_messages {
            debug!(%peer, topic, count = *count, "[sc-03] topic quota exceeded");
            return Err(ProcessError::Antiflood(format!(
                "peer {} exceeded topic quota on {}",
                peer, topic
            )));
        }
        Ok(())
    }

    fn blacklist_peer(&self, peer: &PeerId, reason: &str, duration: Duration) {
        if peer.as_bytes().is_empty() {
            return;
        }
        warn!(%peer, reason, secs = duration.as_secs(), "[sc-03] blacklisting peer");
        metrics::record_peer_blacklisted();
        self.blacklist.upsert(peer.clone(), duration);
    }

    fn is_blacklisted(&self, peer: &PeerId) -> bool {
        self.blacklist.contains(peer)
    }

    fn is_originator_eligible_for_topic(
        &self,
        originator: &PeerId,
        topic: &str,
    ) -> Result<(), ProcessError> {
        if !self.validators_only_topics.read().contains(topic) {
            return Ok(());
        }
        if self.validators.read().contains(originator) {
            return Ok(());
        }
        Err(ProcessError::OriginatorNotEligible {
            originator: originator.to_string(),
            topic: topic.to_string(),
        })
    }
}
