//! # Num-Threads Throttler
//!
//! Caps the number of messages processed at the same time across every
//! interceptor of the node.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::domain::ProcessError;
use crate::metrics;
use crate::ports::InterceptorThrottler;

/// Counting throttler.
#[derive(Debug)]
pub struct NumThreadsThrottler {
    max: u32,
    current: AtomicU32,
}

impl NumThreadsThrottler {
    /// At most `max` messages in flight. Zero is refused.
    pub fn new(max: u32) -> Result<Self, ProcessError> {
        if max == 0 {
            return Err(ProcessError::InvalidConfig("throttler capacity must be > 0".into()));
        }
        Ok(Self {
            max,
            current: AtomicU32::new(0),
        })
    }

    /// Messages currently in flight.
    pub fn in_flight(&self) -> u32 {
        self.current.load(Ordering::Acquire)
    }
}

impl InterceptorThrottler for NumThreadsThrottler {
    fn can_process(&self) -> bool {
        self.current.load(Ordering::Acquire) < self.max
    }

    fn start_processing(&self) {
        let now = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        metrics::set_in_flight(now);
    }

    fn end_processing(&self) {
        loop {
            let current = self.current.load(Ordering::Acquire);
            if current == 0 {
                return;
            }
            if self
                .current
                .compare_exchange(current, current - 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                metrics::set_in_flight(current - 1);
                return;
            }
        }
    }
}

/// Releases a throttler slot when dropped.
pub struct ThrottleGuard<'a> {
    throttler: &'a dyn InterceptorThrottler,
}

impl<'a> ThrottleGuard<'a> {
    /// Takes a slot, or fails with `SystemBusy`.
    pub fn acquire(throttler: &'a dyn InterceptorThrottler) -> Result<Self, ProcessError> {
        if !throttler.can_process() {
            return Err(ProcessError::SystemBusy);
        }
        throttler.start_processing();
        Ok(Self { throttler })
    }
}

impl Drop for ThrottleGuard<'_> {
    fn drop(&mut self) {
        self.throttler.end_processing();
    }
}
