//! Interceptor for topics carrying one object per message.

use shared_types::{P2pMessage, PeerId};

use super::pipeline::ArgInterceptor;
use crate::domain::ProcessError;
use crate::metrics;
use crate::ports::Interceptor;

/// Processes each message as a single object.
pub struct SingleDataInterceptor {
    arg: ArgInterceptor,
}

impl SingleDataInterceptor {
    /// Fails on an empty topic.
    pub fn new(arg: ArgInterceptor) -> Result<Self, ProcessError> {
        arg.check()?;
        Ok(Self { arg })
    }
}

impl Interceptor for SingleDataInterceptor {
    fn topic(&self) -> &str {
        &self.arg.topic
    }

    fn process_received_message(
        &self,
        message: &P2pMessage,
        from_connected_peer: &PeerId,
    ) -> Result<(), ProcessError> {
        let _guard = self.arg.pre_process(message, from_connected_peer)?;

        self.arg.debugger.record_received(&self.arg.topic, 1);
        metrics::record_received(&self.arg.topic, 1);

        self.arg
            .process_element(&message.data, message, from_connected_peer)
    }
}
