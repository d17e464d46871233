//! Engine Benchmarking Module
//!
//! In-process measurement of transformation performance:
//!
//! - Repeated execution of a [`SignalRequest`](crate::engine::SignalRequest)
//!   with per-call timing
//! - Rolling metrics (throughput in points/s, latency percentiles)
//! - Report generation in JSON, text, or CSV, with system context
//!
//! ```rust,ignore
//! use wavelab_core::benchmark::{BenchmarkMetrics, BenchmarkReport, EngineRunner};
//! use wavelab_core::engine::SignalRequest;
//! use wavelab_core::linecode::LineCode;
//!
//! let runner = EngineRunner::new(SignalRequest::LineCode {
//!     bits: "101100010000000011".into(),
//!     scheme: LineCode::B8zs,
//! });
//! let metrics = runner.run(1_000).unwrap();
//! let report = BenchmarkReport::new(runner.label(), 1_000, &metrics.summary());
//! println!("{}", report.to_text());
//! ```

mod metrics;
mod report;
mod runner;

pub use metrics::{BenchmarkMetrics, MetricsSummary};
pub use report::{BenchmarkReport, SystemInfo};
pub use runner::{EngineRunner, RunResult};
