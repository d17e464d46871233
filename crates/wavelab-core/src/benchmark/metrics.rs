//! Benchmark metrics collection
//!
//! Rolling statistics over repeated engine calls: throughput in waveform
//! points per second and a bounded latency window for percentiles.

use super::runner::RunResult;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of latency samples kept for percentile calculation
const MAX_LATENCY_SAMPLES: usize = 1000;

/// Metrics accumulated across benchmark runs.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkMetrics {
    start_time: Option<Instant>,

    /// Completed engine calls
    pub runs: u64,
    /// Total waveform points produced (input + transmitted + output)
    pub points_produced: u64,
    /// Sum of per-call processing time
    pub total_processing_time: Duration,
    /// Failed calls
    pub errors: u64,

    latency_samples: VecDeque<Duration>,
}

impl BenchmarkMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful run.
    pub fn update(&mut self, result: &RunResult) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.runs += 1;
        self.points_produced += result.points_produced as u64;
        self.total_processing_time += result.processing_time;

        if self.latency_samples.len() >= MAX_LATENCY_SAMPLES {
            self.latency_samples.pop_front();
        }
        self.latency_samples.push_back(result.processing_time);
    }

    /// Record a failed run.
    pub fn record_error(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.errors += 1;
    }

    /// Wall-clock time since the first recorded run.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or(Duration::ZERO)
    }

    /// Points produced per second of processing time.
    pub fn throughput_points_per_sec(&self) -> f64 {
        let busy = self.total_processing_time.as_secs_f64();
        if busy > 0.0 {
            self.points_produced as f64 / busy
        } else {
            0.0
        }
    }

    /// Mean latency over all runs.
    pub fn avg_latency(&self) -> Duration {
        if self.runs > 0 {
            self.total_processing_time / self.runs as u32
        } else {
            Duration::ZERO
        }
    }

    /// Latency percentile over the rolling window (`p` in [0, 100]).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.latency_samples.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted: Vec<Duration> = self.latency_samples.iter().copied().collect();
        sorted.sort_unstable();
        let rank = ((p / 100.0) * (sorted.len() - 1) as f64) as usize;
        sorted[rank.min(sorted.len() - 1)]
    }

    /// Minimum latency over the rolling window.
    pub fn min_latency(&self) -> Duration {
        self.latency_samples.iter().min().copied().unwrap_or(Duration::ZERO)
    }

    /// Maximum latency over the rolling window.
    pub fn max_latency(&self) -> Duration {
        self.latency_samples.iter().max().copied().unwrap_or(Duration::ZERO)
    }

    /// Snapshot the current state into a plain summary.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            elapsed_sec: self.elapsed().as_secs_f64(),
            runs: self.runs,
            errors: self.errors,
            points_produced: self.points_produced,
            points_per_sec: self.throughput_points_per_sec(),
            latency_min_us: self.min_latency().as_secs_f64() * 1e6,
            latency_avg_us: self.avg_latency().as_secs_f64() * 1e6,
            latency_max_us: self.max_latency().as_secs_f64() * 1e6,
            latency_p99_us: self.latency_percentile(99.0).as_secs_f64() * 1e6,
        }
    }
}

/// Plain-data snapshot of [`BenchmarkMetrics`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub elapsed_sec: f64,
    pub runs: u64,
    pub errors: u64,
    pub points_produced: u64,
    pub points_per_sec: f64,
    pub latency_min_us: f64,
    pub latency_avg_us: f64,
    pub latency_max_us: f64,
    pub latency_p99_us: f64,
}
