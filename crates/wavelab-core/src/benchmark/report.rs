//! Benchmark report generation
//!
//! Output formats: JSON, text, CSV

use super::metrics::MetricsSummary;
use serde::{Deserialize, Serialize};

/// System information for benchmark context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub os: String,
    pub arch: String,
    pub cpu_cores: usize,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::collect()
    }
}

impl SystemInfo {
    /// Collect system information
    pub fn collect() -> Self {
        Self {
            hostname: hostname::get()
                .map(|h| h.to_string_lossy().to_string())
                .unwrap_or_else(|_| "unknown".to_string()),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_cores: std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1),
        }
    }
}

/// Serializable metrics block of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetrics {
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

impl From<&MetricsSummary> for ReportMetrics {
    fn from(s: &MetricsSummary) -> Self {
        Self {
            elapsed_sec: s.elapsed_sec,
            runs: s.runs,
            errors: s.errors,
            points_produced: s.points_produced,
            points_per_sec: s.points_per_sec,
            latency_min_us: s.latency_min_us,
            latency_avg_us: s.latency_avg_us,
            latency_max_us: s.latency_max_us,
            latency_p99_us: s.latency_p99_us,
        }
    }
}

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// What was benchmarked (runner label)
    pub label: String,
    /// Requested iteration count
    pub iterations: u64,
    pub metrics: ReportMetrics,
    pub system: SystemInfo,
    pub timestamp: String,
}

impl BenchmarkReport {
    /// Create a report from a metrics summary.
    pub fn new(label: &str, iterations: u64, summary: &MetricsSummary) -> Self {
        Self {
            label: label.to_string(),
            iterations,
            metrics: ReportMetrics::from(summary),
            system: SystemInfo::collect(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Output as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as a human-readable block.
    pub fn to_text(&self) -> String {
        let m = &self.metrics;
        format!(
            "Benchmark: {}\n\
             Host:      {} ({}/{}, {} cores)\n\
             Runs:      {} ({} errors)\n\
             Points:    {} total, {:.0} points/s\n\
             Latency:   min {:.1} µs, avg {:.1} µs, p99 {:.1} µs, max {:.1} µs\n",
            self.label,
            self.system.hostname,
            self.system.os,
            self.system.arch,
            self.system.cpu_cores,
            m.runs,
            m.errors,
            m.points_produced,
            m.points_per_sec,
            m.latency_min_us,
            m.latency_avg_us,
            m.latency_p99_us,
            m.latency_max_us,
        )
    }

    /// Output as a single CSV row (with header).
    pub fn to_csv(&self) -> String {
        let m = &self.metrics;
        format!(
            "label,runs,errors,points,points_per_sec,lat_min_us,lat_avg_us,lat_p99_us,lat_max_us\n\
             {},{},{},{},{:.0},{:.1},{:.1},{:.1},{:.1}\n",
            self.label,
            m.runs,
            m.errors,
            m.points_produced,
            m.points_per_sec,
            m.latency_min_us,
            m.latency_avg_us,
            m.latency_p99_us,
            m.latency_max_us,
        )
    }
}
