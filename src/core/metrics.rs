//! Logger metrics for observability
//!
//! Counters for emitted messages, physical lines and failed sink writes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_decorated_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emission(3);
/// metrics.record_failed_write();
///
/// assert_eq!(metrics.emissions(), 1);
/// assert_eq!(metrics.lines_written(), 3);
/// assert_eq!(metrics.failed_writes(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Logical messages written
    emissions: AtomicU64,

    /// Physical lines written across all messages
    lines_written: AtomicU64,

    /// Blocks a sink rejected
    failed_writes: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emissions: AtomicU64::new(0),
            lines_written: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emissions(&self) -> u64 {
        self.emissions.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Record one message of `lines` physical lines
    #[inline]
    pub fn record_emission(&self, lines: u64) {
        self.lines_written.fetch_add(lines, Ordering::Relaxed);
        self.emissions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failed_write(&self) {
        self.failed_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Failed writes as a percentage of attempts (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_writes() as f64;
        let total = failed + self.emissions() as f64;
        if total == 0.0 {
            0.0
        } else {
            failed / total * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
