//! Cancellation and deadline handling for listing calls.

use crate::core::error::{EnumerationError, EnumerationResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Handle used to cancel an in-progress enumeration from elsewhere.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Context passed down to every listing call.
///
/// Cancellation is cooperative: the enumeration loop checks it between
/// listing calls, and backends may check it while listing.
#[derive(Debug, Clone)]
pub struct ListContext {
    cancelled: Arc<AtomicBool>,
    started: Instant,
    timeout: Option<Duration>,
}

impl ListContext {
    /// Create a context with no deadline.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            timeout: None,
        }
    }

    /// Bound the whole enumeration by `timeout`, measured from creation.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Handle for cancelling this context.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.timeout
            .map_or(false, |timeout| self.started.elapsed() >= timeout)
    }

    /// Time left before the deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.timeout
            .map(|timeout| timeout.saturating_sub(self.started.elapsed()))
    }

    /// Fail if the run was cancelled or has run out of time.
    pub fn check(&self, listed: usize) -> EnumerationResult<()> {
        if self.is_cancelled() {
            return Err(EnumerationError::Cancelled { listed });
        }
        if let Some(timeout) = self.timeout.filter(|_| self.is_expired()) {
            return Err(EnumerationError::Timeout {
                duration_secs: timeout.as_secs(),
            });
        }
        Ok(())
    }
}

impl Default for ListContext {
    fn default() -> Self {
        Self::new()
    }
}
