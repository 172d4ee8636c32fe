//! # Interceptors Container
//!
//! Topic-keyed registry of interceptors. Built once by a container factory
//! and then mostly read; mutations are rare and take a write lock.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::{P2pMessage, PeerId};
use tracing::debug;

use crate::domain::ProcessError;
use crate::ports::{Interceptor, MessageReceiver};

/// Interceptors keyed by topic.
#[derive(Default)]
pub struct InterceptorsContainer {
    interceptors: RwLock<HashMap<String, Arc<dyn Interceptor>>>,
}

impl InterceptorsContainer {
    /// Empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one interceptor. Fails if the key is taken.
    pub fn add(&self, key: impl Into<String>, interceptor: Arc<dyn Interceptor>) -> Result<(), ProcessError> {
        let key = key.into();
        let mut map = self.interceptors.write();
        if map.contains_key(&key) {
            return Err(ProcessError::ContainerKeyAlreadyExists(key));
        }
        map.insert(key, interceptor);
        Ok(())
    }

    /// Adds all pairs, or none of them.
    pub fn add_multiple(
        &self,
        keys: Vec<String>,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Result<(), ProcessError> {
        if keys.len() != interceptors.len() {
            return Err(ProcessError::LenMismatch {
                keys: keys.len(),
                interceptors: interceptors.len(),
            });
        }

        let mut map = self.interceptors.write();
        for (i, key) in keys.iter().enumerate() {
            if map.contains_key(key) || keys[..i].contains(key) {
                return Err(ProcessError::ContainerKeyAlreadyExists(key.clone()));
            }
        }
        map.extend(keys.into_iter().zip(interceptors));
        Ok(())
    }

    /// Interceptor bound to `key`, or `InvalidContainerKey`.
    pub fn get(&self, key: &str) -> Result<Arc<dyn Interceptor>, ProcessError> {
        self.interceptors
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| ProcessError::InvalidContainerKey(key.to_string()))
    }

    /// Replaces an existing interceptor.
    pub fn replace(&self, key: &str, interceptor: Arc<dyn Interceptor>) -> Result<(), ProcessError> {
        let mut map = self.interceptors.write();
        match map.get_mut(key) {
            Some(slot) => {
                *slot = interceptor;
                Ok(())
            }
            None => Err(ProcessError::InvalidContainerKey(key.to_string())),
        }
    }

    /// Unbinds `key`.
    pub fn remove(&self, key: &str) -> Option<Arc<dyn Interceptor>> {
        self.interceptors.write().remove(key)
    }

    /// Number of interceptors.
    pub fn len(&self) -> usize {
        self.interceptors.read().len()
    }

    /// True when no interceptor is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.interceptors.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Visits every pair until `f` returns `false`.
    ///
    /// The visit runs on a snapshot, so `f` may call back into the container.
    pub fn iterate(&self, mut f: impl FnMut(&str, &Arc<dyn Interceptor>) -> bool) {
        let snapshot: Vec<(String, Arc<dyn Interceptor>)> = self
            .interceptors
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, interceptor) in &snapshot {
            if !f(key, interceptor) {
                break;
            }
        }
    }
}

impl MessageReceiver for InterceptorsContainer {
    fn receive(&self, topic: &str, data: Vec<u8>, from: &PeerId) -> Result<(), ProcessError> {
        let interceptor = self.get(topic).inspect_err(|_| {
            debug!(topic, %from, "[sc-03] message on unknown topic");
        })?;
        let message = P2pMessage::new(topic, data, from.clone());
        interceptor.process_received_message(&message, from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        topic: String,
        calls: AtomicUsize,
    }

    impl Counting {
        fn new(topic: &str) -> Arc<Self> {
            Arc::new(Self {
                topic: topic.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Interceptor for Counting {
        fn topic(&self) -> &str {
            &self.topic
        }

        fn process_received_message(&self, _: &P2pMessage, _: &PeerId) -> Result<(), ProcessError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_add_get_remove() {
        let container = InterceptorsContainer::new();
        container.add("a", Counting::new("a")).unwrap();
        assert_eq!(
            container.add("a", Counting::new("a")).unwrap_err(),
            ProcessError::ContainerKeyAlreadyExists("a".into())
        );
        assert_eq!(container.get("a").unwrap().topic(), "a");
        assert!(container.remove("a").is_some());
        assert!(container.get("a").is_err());
        assert!(container.is_empty());
    }

    #[test]
    fn test_add_multiple_is_atomic() {
        let container = InterceptorsContainer::new();
        container.add("b", Counting::new("b")).unwrap();

        let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let interceptors: Vec<Arc<dyn Interceptor>> =
            vec![Counting::new("a"), Counting::new("b"), Counting::new("c")];
        assert!(container.add_multiple(keys, interceptors).is_err());
        assert_eq!(container.len(), 1);

        let keys = vec!["x".to_string(), "x".to_string()];
        let interceptors: Vec<Arc<dyn Interceptor>> = vec![Counting::new("x"), Counting::new("x")];
        assert!(container.add_multiple(keys, interceptors).is_err());
        assert_eq!(container.len(), 1);

        assert!(matches!(
            container.add_multiple(vec!["y".into()], Vec::new()),
            Err(ProcessError::LenMismatch { .. })
        ));
    }

    #[test]
    fn test_replace() {
        let container = InterceptorsContainer::new();
        assert!(container.replace("a", Counting::new("a")).is_err());
        container.add("a", Counting::new("a")).unwrap();
        container.replace("a", Counting::new("a2")).unwrap();
        assert_eq!(container.get("a").unwrap().topic(), "a2");
    }

    #[test]
    fn test_iterate_stops_early() {
        let container = InterceptorsContainer::new();
        for key in ["a", "b", "c"] {
            container.add(key, Counting::new(key)).unwrap();
        }
        let mut seen = 0;
        container.iterate(|_, _| {
            seen += 1;
            seen < 2
        });
        assert_eq!(seen, 2);
        assert_eq!(container.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_receive_routes_by_topic() {
        let container = InterceptorsContainer::new();
        let a = Counting::new("a");
        container.add("a", a.clone()).unwrap();
        let peer = PeerId::new(vec![1]);
        container.receive("a", vec![1], &peer).unwrap();
        assert_eq!(a.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            container.receive("b", vec![1], &peer).unwrap_err(),
            ProcessError::InvalidContainerKey("b".into())
        );
    }
}
