//! # Requested-Data Whitelist
//!
//! The request side of the node adds the hashes it asked peers for. When
//! the answer arrives on a topic, the interceptor lets it through even if
//! it belongs to another shard or comes from an ineligible originator.

use std::time::Duration;

use tracing::trace;

use crate::adapters::TimeCache;
use crate::domain::InterceptedData;
use crate::ports::WhiteListHandler;

/// Whitelist entries expire after a span, so unanswered requests do not
/// accumulate.
#[derive(Debug)]
pub struct RequestedDataWhiteList {
    span: Duration,
    cache: TimeCache<Vec<u8>>,
}

impl RequestedDataWhiteList {
    /// Entries live for `span`.
    pub fn new(span: Duration) -> Self {
        Self {
            span,
            cache: TimeCache::new(span),
        }
    }

    /// Drops expired entries.
    pub fn sweep(&self) {
        self.cache.sweep();
    }
}

impl WhiteListHandler for RequestedDataWhiteList {
    fn add(&self, keys: &[Vec<u8>]) {
        trace!(count = keys.len(), "[sc-03] whitelisting requested hashes");
        for key in keys {
            self.cache.upsert(key.clone(), self.span);
        }
    }

    fn remove(&self, keys: &[Vec<u8>]) {
        for key in keys {
            self.cache.remove(key);
        }
    }

    fn is_white_listed(&self, data: &InterceptedData) -> bool {
        self.cache.contains(&data.hash().to_vec())
    }
}
