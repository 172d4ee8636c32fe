//! Steps shared by single and batch interceptors.

use std::sync::Arc;
use std::time::Duration;

use shared_types::{P2pMessage, PeerId};
use tracing::{debug, trace};

use crate::adapters::ThrottleGuard;
use crate::domain::{InterceptedDataFactory, InterceptionDebugger, InterceptorProcessor, ProcessError};
use crate::metrics;
use crate::ports::{AntifloodHandler, InterceptorThrottler, WhiteListHandler};

/// How peers are penalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyPolicy {
    /// How long a penalized peer stays blacklisted.
    pub blacklist_duration: Duration,
    /// Undecodable payloads count as a protocol violation.
    pub blacklist_on_decode_failure: bool,
}

impl Default for PenaltyPolicy {
    fn default() -> Self {
        Self {
            blacklist_duration: Duration::from_secs(3_600),
            blacklist_on_decode_failure: true,
        }
    }
}

/// Everything an interceptor needs for one topic.
pub struct ArgInterceptor {
    /// Topic the interceptor is bound to.
    pub topic: String,
    /// Decodes one element.
    pub factory: Arc<dyn InterceptedDataFactory>,
    /// Validates and stores admitted elements.
    pub processor: Arc<dyn InterceptorProcessor>,
    /// Quotas, originator eligibility and peer penalties.
    pub antiflood: Arc<dyn AntifloodHandler>,
    /// Shared in-flight cap.
    pub throttler: Arc<dyn InterceptorThrottler>,
    /// Data this node requested.
    pub white_list: Arc<dyn WhiteListHandler>,
    /// Per-topic counters.
    pub debugger: Arc<InterceptionDebugger>,
    /// Penalty settings.
    pub policy: PenaltyPolicy,
}

impl ArgInterceptor {
    pub(crate) fn check(&self) -> Result<(), ProcessError> {
        if self.topic.is_empty() {
            return Err(ProcessError::InvalidConfig("empty topic".into()));
        }
        Ok(())
    }

    /// Antiflood gates followed by a throttler slot. A refusal is counted
    /// against `from` like any other rejection.
    pub(crate) fn pre_process(
        &self,
        message: &P2pMessage,
        from: &PeerId,
    ) -> Result<ThrottleGuard<'_>, ProcessError> {
        self.admit(message, from)
            .and_then(|_| ThrottleGuard::acquire(self.throttler.as_ref()))
            .inspect_err(|err| self.reject(from, err))
    }

    fn admit(&self, message: &P2pMessage, from: &PeerId) -> Result<(), ProcessError> {
        if message.data.is_empty() {
            return Err(ProcessError::NoDataInMessage);
        }
        self.antiflood.can_process_message(message, from)?;
        self.antiflood.can_process_messages_on_topic(
            from,
            &self.topic,
            1,
            message.data.len() as u64,
        )
    }

    /// Penalizes both the originator and the relaying peer.
    pub(crate) fn blacklist(&self, message: &P2pMessage, from: &PeerId, reason: &ProcessError) {
        let reason = reason.to_string();
        self.antiflood
            .blacklist_peer(&message.originator, &reason, self.policy.blacklist_duration);
        if from != &message.originator {
            self.antiflood
                .blacklist_peer(from, &reason, self.policy.blacklist_duration);
        }
    }

    pub(crate) fn reject(&self, from: &PeerId, err: &ProcessError) {
        let class = err.class();
        debug!(topic = %self.topic, %from, class = class.as_str(), error = %err, "[sc-03] rejected");
        self.debugger.record_rejected(&self.topic, from, class);
        metrics::record_rejected(class.as_str());
    }

    /// Decode, check, filter and store one object.
    pub(crate) fn process_element(
        &self,
        buff: &[u8],
        message: &P2pMessage,
        from: &PeerId,
    ) -> Result<(), ProcessError> {
        let data = match self.factory.create(buff) {
            Ok(data) => data,
            Err(err) => {
                if self.policy.blacklist_on_decode_failure {
                    self.blacklist(message, from, &err);
                }
                self.reject(from, &err);
                return Err(err);
            }
        };

        if let Err(err) = data.check_validity() {
            if err.is_trust_failure() {
                self.blacklist(message, from, &err);
            }
            self.reject(from, &err);
            return Err(err);
        }

        let white_listed = self.white_list.is_white_listed(&data);
        if !white_listed {
            if let Err(err) = self
                .antiflood
                .is_originator_eligible_for_topic(&message.originator, &self.topic)
            {
                debug!(
                    topic = %self.topic,
                    originator = %message.originator,
                    "[sc-03] originator not eligible for topic"
                );
                self.reject(from, &err);
                return Err(err);
            }
        }

        if !data.is_for_current_shard() && !white_listed {
            trace!(topic = %self.topic, kind = data.type_name(), "[sc-03] not for this shard");
            self.debugger.record_not_for_shard(&self.topic);
            return Ok(());
        }

        if let Err(err) = self.processor.validate(&data) {
            self.reject(from, &err);
            return Err(err);
        }

        let kind = data.type_name();
        let added = self.processor.save(data, &message.originator).inspect_err(|err| {
            self.reject(from, err);
        })?;
        trace!(topic = %self.topic, kind, added, "[sc-03] intercepted data saved");
        self.debugger.record_accepted(&self.topic, added);
        if added {
            metrics::record_accepted(&self.topic);
        }
        Ok(())
    }
}
