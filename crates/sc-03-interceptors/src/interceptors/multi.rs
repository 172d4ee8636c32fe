//! Interceptor for topics carrying batches.
//!
//! Elements are decoded and checked in parallel. A bad element is rejected
//! (and its sender penalized, if warranted) without affecting its
//! siblings.

use rayon::prelude::*;
use shared_types::{Batch, Marshaller, P2pMessage, PeerId};

use super::pipeline::ArgInterceptor;
use crate::domain::ProcessError;
use crate::metrics;
use crate::ports::Interceptor;

/// Processes each message as a [`Batch`].
pub struct MultiDataInterceptor {
    arg: ArgInterceptor,
    marshaller: Marshaller,
}

impl MultiDataInterceptor {
    /// Fails on an empty topic.
    pub fn new(arg: ArgInterceptor, marshaller: Marshaller) -> Result<Self, ProcessError> {
        arg.check()?;
        Ok(Self { arg, marshaller })
    }

    /// Decodes the envelope and charges the topic quota for every element.
    fn unmarshal_batch(&self, message: &P2pMessage, from: &PeerId) -> Result<Batch, ProcessError> {
        let batch: Batch = self
            .marshaller
            .unmarshal(&message.data)
            .map_err(ProcessError::from)
            .inspect_err(|err| {
                if self.arg.policy.blacklist_on_decode_failure {
                    self.arg.blacklist(message, from, err);
                }
            })?;
        if batch.is_empty() {
            return Err(ProcessError::NoDataInMessage);
        }

        self.arg.antiflood.can_process_messages_on_topic(
            from,
            &self.arg.topic,
            batch.len() as u32,
            batch.total_size() as u64,
        )?;
        Ok(batch)
    }
}

impl Interceptor for MultiDataInterceptor {
    fn topic(&self) -> &str {
        &self.arg.topic
    }

    /// Returns the first element error in batch order, after every element
    /// has been processed.
    fn process_received_message(
        &self,
        message: &P2pMessage,
        from_connected_peer: &PeerId,
    ) -> Result<(), ProcessError> {
        let _guard = self.arg.pre_process(message, from_connected_peer)?;

        let batch = self
            .unmarshal_batch(message, from_connected_peer)
            .inspect_err(|err| self.arg.reject(from_connected_peer, err))?;

        self.arg
            .debugger
            .record_received(&self.arg.topic, batch.len() as u64);
        metrics::record_received(&self.arg.topic, batch.len() as u64);

        let results: Vec<Result<(), ProcessError>> = batch
            .data
            .par_iter()
            .map(|buff| self.arg.process_element(buff, message, from_connected_peer))
            .collect();

        match results.into_iter().find_map(Result::err) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
