//! # In-Memory Messenger
//!
//! Topic registry and local delivery, standing in for the gossip transport
//! when several nodes run in one process.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::{P2pMessage, PeerId};

use crate::domain::ProcessError;
use crate::ports::{Interceptor, TopicHandler};

/// Topic handler keeping processors in memory.
#[derive(Default)]
pub struct InMemoryMessenger {
    topics: RwLock<HashSet<String>>,
    processors: RwLock<HashMap<String, Arc<dyn Interceptor>>>,
    failing_topic: Option<String>,
}

impl InMemoryMessenger {
    /// No topics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messenger refusing to register a processor on `topic`.
    pub fn with_failing_topic(topic: impl Into<String>) -> Self {
        Self {
            failing_topic: Some(topic.into()),
            ..Self::default()
        }
    }

    /// Delivers `data` on `topic` as if relayed by `from`.
    pub fn deliver(&self, topic: &str, data: Vec<u8>, from: &PeerId) -> Result<(), ProcessError> {
        let processor = self
            .processors
            .read()
            .get(topic)
            .cloned()
            .ok_or_else(|| ProcessError::InvalidContainerKey(topic.to_string()))?;
        let message = P2pMessage::new(topic, data, from.clone());
        processor.process_received_message(&message, from)
    }

    /// True when a processor is bound to `topic`.
    pub fn has_processor(&self, topic: &str) -> bool {
        self.processors.read().contains_key(topic)
    }

    /// Number of bound processors.
    pub fn processor_count(&self) -> usize {
        self.processors.read().len()
    }
}

impl TopicHandler for InMemoryMessenger {
    fn create_topic(&self, name: &str, _create_channel: bool) -> Result<(), String> {
        self.topics.write().insert(name.to_string());
        Ok(())
    }

    fn has_topic(&self, name: &str) -> bool {
        self.topics.read().contains(name)
    }

    fn register_message_processor(
        &self,
        topic: &str,
        processor: Arc<dyn Interceptor>,
    ) -> Result<(), String> {
        if self.failing_topic.as_deref() == Some(topic) {
            return Err(format!("registration refused for {}", topic));
        }
        if !self.has_topic(topic) {
            return Err(format!("topic {} does not exist", topic));
        }
        let mut processors = self.processors.write();
        if processors.contains_key(topic) {
            return Err(format!("topic {} already has a processor", topic));
        }
        processors.insert(topic.to_string(), processor);
        Ok(())
    }

    fn unregister_message_processor(&self, topic: &str) -> Result<(), String> {
        self.processors.write().remove(topic);
        Ok(())
    }
}
