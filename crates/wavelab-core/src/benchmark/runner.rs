//! Engine benchmark runner
//!
//! Executes one fixed [`SignalRequest`] repeatedly against the engine and
//! times every call. The request and configuration are frozen at
//! construction so every iteration measures identical work.

use super::metrics::BenchmarkMetrics;
use crate::config::EngineConfig;
use crate::engine::{self, SignalRequest};
use crate::types::{EngineResult, SignalResult};
use std::time::{Duration, Instant};

/// Result of a single timed engine call.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The engine's output
    pub result: SignalResult,
    /// Time spent inside the call
    pub processing_time: Duration,
    /// Total waveform points across input, transmitted and output
    pub points_produced: usize,
}

/// Repeated-call benchmark driver for one request.
#[derive(Debug, Clone)]
pub struct EngineRunner {
    request: SignalRequest,
    config: EngineConfig,
    label: String,
}

impl EngineRunner {
    /// Create a runner with the default engine configuration.
    pub fn new(request: SignalRequest) -> Self {
        Self::with_config(request, EngineConfig::default())
    }

    /// Create a runner with an explicit engine configuration.
    pub fn with_config(request: SignalRequest, config: EngineConfig) -> Self {
        let label = match &request {
            SignalRequest::LineCode { scheme, .. } => format!("line_code/{}", scheme),
            SignalRequest::DigitalModulate { scheme, .. } => {
                format!("digital_modulate/{}", scheme)
            }
            SignalRequest::AnalogToDigital { .. } => "analog_to_digital".to_string(),
            SignalRequest::AnalogModulate { scheme, .. } => {
                format!("analog_modulate/{}", scheme)
            }
        };
        Self {
            request,
            config,
            label,
        }
    }

    /// Short description of the benchmarked request.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Execute the request once, timed.
    pub fn run_once(&self) -> EngineResult<RunResult> {
        let start = Instant::now();
        let result = engine::simulate_with(&self.request, &self.config)?;
        let processing_time = start.elapsed();

        let points_produced =
            result.input.len() + result.transmitted.len() + result.output.len();
        Ok(RunResult {
            result,
            processing_time,
            points_produced,
        })
    }

    /// Execute the request `iterations` times, collecting metrics.
    ///
    /// An invalid request fails every iteration identically, so the first
    /// error aborts the loop rather than recording `iterations` copies
    /// of it.
    pub fn run(&self, iterations: u64) -> EngineResult<BenchmarkMetrics> {
        let mut metrics = BenchmarkMetrics::new();
        for i in 0..iterations {
            match self.run_once() {
                Ok(result) => metrics.update(&result),
                Err(err) => {
                    metrics.record_error();
                    tracing::debug!(label = %self.label, iteration = i, error = %err, "benchmark aborted");
                    return Err(err);
                }
            }
        }
        tracing::debug!(
            label = %self.label,
            runs = metrics.runs,
            avg_us = metrics.avg_latency().as_secs_f64() * 1e6,
            "benchmark complete"
        );
        Ok(metrics)
    }
}
