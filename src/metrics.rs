// Dialog metrics module
//
// Provides lightweight counters for monitoring how requests end

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::models::{CancelReason, Response};

/// Global dialog metrics
///
/// Uses atomic operations for thread-safe metric tracking without locks.
/// Updated by the request bridge for every request and exposed through the
/// health check.
#[derive(Debug)]
pub struct Metrics {
    /// Requests handed to the presenter
    pub dialogs_presented: AtomicU64,

    /// Requests the human answered
    pub answered: AtomicU64,

    /// Requests cancelled by the human (button, Escape or window close)
    pub cancelled: AtomicU64,

    /// Requests that hit their deadline
    pub timed_out: AtomicU64,

    /// Requests that ended in an error
    pub failed: AtomicU64,

    /// Time spent waiting for the dialog slot, in milliseconds
    pub total_queue_wait_ms: AtomicU64,

    /// Time dialogs were on screen, in milliseconds
    pub total_dialog_time_ms: AtomicU64,

    /// Process start time
    start_time: Instant,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub dialogs_presented: u64,
    pub answered: u64,
    pub cancelled: u64,
    pub timed_out: u64,
    pub failed: u64,
    pub uptime_secs: u64,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            dialogs_presented: AtomicU64::new(0),
            answered: AtomicU64::new(0),
            cancelled: AtomicU64::new(0),
            timed_out: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            total_queue_wait_ms: AtomicU64::new(0),
            total_dialog_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a dialog handed to the presenter
    pub fn record_presented(&self) {
        self.dialogs_presented.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the terminal outcome of a request
    pub fn record_outcome(&self, response: &Response) {
        let counter = match response {
            Response::Answered(_) => &self.answered,
            Response::Cancelled(CancelReason::TimedOut) => &self.timed_out,
            Response::Cancelled(_) => &self.cancelled,
            Response::Failed(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record time spent queued behind another dialog
    pub fn record_queue_wait(&self, duration: Duration) {
        self.total_queue_wait_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record how long a dialog was open
    pub fn record_dialog_time(&self, duration: Duration) {
        self.total_dialog_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get average time a presented dialog stayed open, in milliseconds
    pub fn avg_dialog_time_ms(&self) -> f64 {
        let total = self.total_dialog_time_ms.load(Ordering::Relaxed);
        let count = self.dialogs_presented.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            dialogs_presented: self.dialogs_presented.load(Ordering::Relaxed),
            answered: self.answered.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            uptime_secs: self.uptime().as_secs(),
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        tracing::info!("=== Dialog Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Dialogs: {} presented, {} answered, {} cancelled, {} timed out, {} failed",
            snapshot.dialogs_presented,
            snapshot.answered,
            snapshot.cancelled,
            snapshot.timed_out,
            snapshot.failed
        );
        tracing::info!(
            "Queue wait: {:.2}s total, dialog time avg: {:.0}ms",
            self.total_queue_wait_ms.load(Ordering::Relaxed) as f64 / 1000.0,
            self.avg_dialog_time_ms()
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
