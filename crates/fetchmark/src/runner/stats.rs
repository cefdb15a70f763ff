//! Per-invocation timing statistics
//!
//! The runner records one duration per completed invocation from a single
//! thread, so a plain sample vector is enough.

use std::time::Duration;

use serde::Serialize;

/// Records the wall-clock duration of each completed invocation
#[derive(Debug, Default)]
pub struct IterationStats {
    samples: Vec<Duration>,
}

impl IterationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed invocation
    pub fn record(&mut self, duration: Duration) {
        self.samples.push(duration);
    }

    /// Number of recorded invocations
    pub fn count(&self) -> u64 {
        self.samples.len() as u64
    }

    /// Mean invocation duration
    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    /// Minimum invocation duration
    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Maximum invocation duration
    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Percentile (0.0 to 1.0) over the recorded samples
    pub fn percentile(&self, p: f64) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_unstable();
        let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
        sorted[idx]
    }

    /// Summary statistics for reporting
    pub fn summary(&self) -> LatencySummary {
        LatencySummary {
            count: self.count(),
            mean: self.mean(),
            min: self.min(),
            max: self.max(),
            p50: self.percentile(0.50),
            p95: self.percentile(0.95),
            p99: self.percentile(0.99),
        }
    }
}

/// Summary of invocation durations
#[derive(Debug, Clone, Default, Serialize)]
pub struct LatencySummary {
    pub count: u64,
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}
