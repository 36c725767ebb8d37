//! Worker statistics.
//!
//! Counters are written only by the worker thread and read from anywhere.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters for worker activity.
#[derive(Debug, Default)]
pub struct WorkerMetrics {
    /// Reads answered with a full batch
    reads_served: AtomicU64,
    /// Reads that found fewer than `batch_size` blocks
    reads_pending: AtomicU64,
    /// Samples per channel accepted by writes
    samples_written: AtomicU64,
    /// Transform steps run while draining writes
    write_steps: AtomicU64,
    /// Requests rejected with an error
    rejected: AtomicU64,
}

impl WorkerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self, served: bool) {
        let counter = if served {
            &self.reads_served
        } else {
            &self.reads_pending
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self, samples: usize, steps: usize) {
        self.samples_written
            .fetch_add(samples as u64, Ordering::Relaxed);
        self.write_steps.fetch_add(steps as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> WorkerMetricsSnapshot {
        WorkerMetricsSnapshot {
            reads_served: self.reads_served.load(Ordering::Relaxed),
            reads_pending: self.reads_pending.load(Ordering::Relaxed),
            samples_written: self.samples_written.load(Ordering::Relaxed),
            write_steps: self.write_steps.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.reads_served.store(0, Ordering::Relaxed);
        self.reads_pending.store(0, Ordering::Relaxed);
        self.samples_written.store(0, Ordering::Relaxed);
        self.write_steps.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of [`WorkerMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerMetricsSnapshot {
    pub reads_served: u64,
    pub reads_pending: u64,
    pub samples_written: u64,
    pub write_steps: u64,
    pub rejected: u64,
}

impl WorkerMetricsSnapshot {
    /// Fraction of reads that delivered a batch (0.0 - 1.0).
    pub fn read_hit_rate(&self) -> f64 {
        let total = self.reads_served + self.reads_pending;
        if total == 0 {
            0.0
        } else {
            self.reads_served as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = WorkerMetrics::new();
        metrics.record_read(true);
        metrics.record_read(false);
        metrics.record_read(false);
        metrics.record_write(1024, 3);
        metrics.record_write(512, 1);
        metrics.record_rejected();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.reads_served, 1);
        assert_eq!(snapshot.reads_pending, 2);
        assert_eq!(snapshot.samples_written, 1536);
        assert_eq!(snapshot.write_steps, 4);
        assert_eq!(snapshot.rejected, 1);
    }

    #[test]
    fn test_read_hit_rate() {
        assert_eq!(WorkerMetricsSnapshot::default().read_hit_rate(), 0.0);

        let metrics = WorkerMetrics::new();
        for served in [true, true, true, false] {
            metrics.record_read(served);
        }
        assert!((metrics.snapshot().read_hit_rate() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_reset() {
        let metrics = WorkerMetrics::new();
        metrics.record_write(10, 1);
        metrics.reset();
        assert_eq!(metrics.snapshot(), WorkerMetricsSnapshot::default());
    }
}
