//! Sink write counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a stream sink.
///
/// # Example
///
/// ```
/// use errorlog::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.failed_writes(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SinkMetrics {
    lines_written: AtomicU64,
    failed_writes: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) {
        self.lines_written.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed write, returning the previous failure count.
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_writes.fetch_add(1, Ordering::Relaxed)
    }

    /// Fraction of attempted writes that failed (0.0 when nothing was written)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_writes() as f64;
        let total = failed + self.lines_written() as f64;
        if total == 0.0 {
            0.0
        } else {
            failed / total
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = SinkMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..3 {
            metrics.record_written();
        }
        assert_eq!(metrics.record_failed(), 0);
        assert_eq!(metrics.lines_written(), 3);
        assert_eq!(metrics.failed_writes(), 1);
        assert!((metrics.failure_rate() - 0.25).abs() < f64::EPSILON);
    }
}
