//! Analog→digital conversion: PCM and delta modulation
//!
//! Both schemes share one skeleton: walk the configured sample instants,
//! read the analog input at each instant via linear interpolation (the
//! instants rarely coincide with the input's own grid), then either
//! quantize the value (PCM) or track its sign of change (delta modulation)
//! and reconstruct an approximation.
//!
//! For PCM the transmitted waveform carries the raw quantization index and
//! the output carries the reconstructed level. For delta modulation the
//! transmitted waveform is the bit stream and the output is the tracking
//! staircase.

use crate::config::DigitizeParams;
use crate::interp;
use crate::types::{EngineResult, Point, SignalError};
use serde::{Deserialize, Serialize};

/// How far ahead of a step the staircase holds the previous level, so the
/// output draws as a near-vertical edge rather than a long ramp.
const STAIR_EDGE_S: f64 = 0.001;

/// PCM configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PcmConfig {
    /// Sampling rate in Hz
    pub sampling_rate: f64,
    /// Number of quantization levels (≥ 2)
    pub quantization_levels: u32,
}

impl PcmConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.sampling_rate <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "sampling_rate must be positive, got {}",
                self.sampling_rate
            )));
        }
        if self.quantization_levels < 2 {
            return Err(SignalError::InvalidParameter(format!(
                "quantization_levels must be at least 2, got {}",
                self.quantization_levels
            )));
        }
        Ok(())
    }
}

/// Delta modulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaConfig {
    /// Sampling rate in Hz
    pub sampling_rate: f64,
    /// Step size as a fraction of the signal amplitude, in (0, 1]
    pub delta_step_ratio: f64,
}

impl DeltaConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.sampling_rate <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "sampling_rate must be positive, got {}",
                self.sampling_rate
            )));
        }
        if self.delta_step_ratio <= 0.0 || self.delta_step_ratio > 1.0 {
            return Err(SignalError::InvalidParameter(format!(
                "delta_step_ratio must be in (0, 1], got {}",
                self.delta_step_ratio
            )));
        }
        Ok(())
    }
}

/// Conversion method selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Digitize {
    Pcm(PcmConfig),
    Delta(DeltaConfig),
}

impl Digitize {
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            Digitize::Pcm(cfg) => cfg.validate(),
            Digitize::Delta(cfg) => cfg.validate(),
        }
    }
}

/// Analog→digital converter over a generated analog input.
#[derive(Debug, Clone)]
pub struct Digitizer {
    params: DigitizeParams,
}

impl Digitizer {
    pub fn new(params: &DigitizeParams) -> Self {
        Self {
            params: params.clone(),
        }
    }

    /// Generate the analog input this converter operates on, at the
    /// configured duration and density.
    pub fn sample_input(&self, frequency: f64, amplitude: f64) -> Vec<Point> {
        crate::sampler::analog_sine(frequency, amplitude, self.params.duration, self.params.input_rate)
    }

    /// Sample instants walk `i / sampling_rate` from zero through the
    /// input's final timestamp inclusive, each rounded to 1 µs so long
    /// walks don't accumulate floating drift.
    fn instants(input: &[Point], sampling_rate: f64) -> impl Iterator<Item = f64> + '_ {
        let interval = 1.0 / sampling_rate;
        let end = input.last().map(|p| p.x).unwrap_or(0.0);
        (0u64..)
            .map(move |i| i as f64 * interval)
            .take_while(move |&t| t <= end)
            .map(|t| (t * 1e6).round() / 1e6)
    }

    /// Pulse-code modulation.
    ///
    /// Returns `(transmitted, output)`: the integer quantization index per
    /// sample instant, and the level reconstructed from that index.
    pub fn pcm(&self, input: &[Point], amplitude: f64, cfg: &PcmConfig) -> (Vec<Point>, Vec<Point>) {
        let levels = (cfg.quantization_levels - 1) as f64;
        let inv_amp = 1.0 / amplitude;

        let mut transmitted = Vec::new();
        let mut output = Vec::new();
        for t in Self::instants(input, cfg.sampling_rate) {
            let value = interp::value_at(input, t);
            // [-amp, amp] → [0, 1] → nearest integer level → back
            let normalized = (value * inv_amp + 1.0) * 0.5;
            let quantized = (normalized * levels).round();
            let reconstructed = (quantized / levels * 2.0 - 1.0) * amplitude;

            transmitted.push(Point::new(t, quantized));
            output.push(Point::new(t, reconstructed));
        }
        (transmitted, output)
    }

    /// Delta modulation.
    ///
    /// Emits one bit per instant (1 when the input is above the running
    /// approximation), steps the approximation by `±amplitude × ratio`, and
    /// clamps it to ±1.5× amplitude to bound slope-overload drift. The
    /// output staircase holds each level until just before the next step;
    /// a hold point that would land before the previous output point (the
    /// very first step, or a sub-millisecond sampling interval) is skipped
    /// to keep the sequence ordered.
    pub fn delta(
        &self,
        input: &[Point],
        amplitude: f64,
        cfg: &DeltaConfig,
    ) -> (Vec<Point>, Vec<Point>) {
        let delta = amplitude * cfg.delta_step_ratio;
        let clamp = 1.5 * amplitude;

        let mut approximation = 0.0;
        let mut transmitted = Vec::new();
        let mut prev = Point::new(0.0, approximation);
        let mut output = vec![prev];

        for t in Self::instants(input, cfg.sampling_rate) {
            let value = interp::value_at(input, t);
            let bit = if value > approximation { 1.0 } else { 0.0 };
            transmitted.push(Point::new(t, bit));

            approximation += if bit == 1.0 { delta } else { -delta };
            approximation = approximation.clamp(-clamp, clamp);

            if t - STAIR_EDGE_S >= prev.x {
                output.push(Point::new(t - STAIR_EDGE_S, prev.y));
            }
            prev = Point::new(t, approximation);
            output.push(prev);
        }

        // Extend the final level to the end of the input
        if let Some(end) = input.last() {
            output.push(Point::new(end.x, prev.y));
        }
        (transmitted, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler;
    use approx::assert_relative_eq;

    fn sine_input() -> Vec<Point> {
        sampler::analog_sine(2.0, 1.0, 2.0, 100)
    }

    fn digitizer() -> Digitizer {
        Digitizer::new(&DigitizeParams::default())
    }

    #[test]
    fn test_pcm_indices_are_integers_in_range() {
        let cfg = PcmConfig {
            sampling_rate: 10.0,
            quantization_levels: 16,
        };
        let (transmitted, _) = digitizer().pcm(&sine_input(), 1.0, &cfg);
        assert!(!transmitted.is_empty());
        for p in &transmitted {
            assert_relative_eq!(p.y, p.y.round());
            assert!(p.y >= 0.0 && p.y <= 15.0, "index {} out of range", p.y);
        }
    }

    #[test]
    fn test_pcm_sample_count() {
        // Input ends at t = 1.99; instants 0, 0.1, ... 1.9 → 20 samples
        let cfg = PcmConfig {
            sampling_rate: 10.0,
            quantization_levels: 8,
        };
        let (transmitted, output) = digitizer().pcm(&sine_input(), 1.0, &cfg);
        assert_eq!(transmitted.len(), 20);
        assert_eq!(output.len(), 20);
    }

    #[test]
    fn test_pcm_reconstruction_converges_with_levels() {
        // Quantization error shrinks as the level count grows
        let input = sine_input();
        let mut last_error = f64::MAX;
        for levels in [4u32, 16, 64, 1024] {
            let cfg = PcmConfig {
                sampling_rate: 50.0,
                quantization_levels: levels,
            };
            let (_, output) = digitizer().pcm(&input, 1.0, &cfg);
            let error = output
                .iter()
                .map(|p| (p.y - interp::value_at(&input, p.x)).abs())
                .fold(0.0, f64::max);
            assert!(error < last_error || error == 0.0);
            last_error = error;
        }
        // 1024 levels reproduce a unit sine within half a step
        assert!(last_error <= 1.0 / 1023.0 + 1e-9);
    }

    #[test]
    fn test_pcm_reconstruction_bounded_by_amplitude() {
        let cfg = PcmConfig {
            sampling_rate: 40.0,
            quantization_levels: 4,
        };
        let (_, output) = digitizer().pcm(&sine_input(), 1.0, &cfg);
        for p in &output {
            assert!(p.y.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_delta_bits_are_binary() {
        let cfg = DeltaConfig {
            sampling_rate: 20.0,
            delta_step_ratio: 0.1,
        };
        let (transmitted, _) = digitizer().delta(&sine_input(), 1.0, &cfg);
        assert!(!transmitted.is_empty());
        for p in &transmitted {
            assert!(p.y == 0.0 || p.y == 1.0);
        }
    }

    #[test]
    fn test_delta_approximation_clamped() {
        // A huge step ratio slams the tracker into the clamp bound
        let cfg = DeltaConfig {
            sampling_rate: 100.0,
            delta_step_ratio: 1.0,
        };
        let (_, output) = digitizer().delta(&sine_input(), 1.0, &cfg);
        for p in &output {
            assert!(p.y.abs() <= 1.5 + 1e-9, "level {} escaped the clamp", p.y);
        }
    }

    #[test]
    fn test_delta_staircase_ordered() {
        let cfg = DeltaConfig {
            sampling_rate: 10.0,
            delta_step_ratio: 0.2,
        };
        let (_, output) = digitizer().delta(&sine_input(), 1.0, &cfg);
        for pair in output.windows(2) {
            assert!(
                pair[0].x <= pair[1].x,
                "staircase out of order at {} > {}",
                pair[0].x,
                pair[1].x
            );
        }
    }

    #[test]
    fn test_delta_staircase_holds_previous_level() {
        let cfg = DeltaConfig {
            sampling_rate: 10.0,
            delta_step_ratio: 0.1,
        };
        let (_, output) = digitizer().delta(&sine_input(), 1.0, &cfg);
        // Hold points: level matches the previous point, 1 ms before a step
        let hold = output
            .iter()
            .enumerate()
            .find(|(_, p)| (p.x * 1000.0).round() as i64 % 100 == 99)
            .map(|(i, _)| i)
            .expect("staircase contains hold points");
        assert_relative_eq!(output[hold].y, output[hold - 1].y);
    }

    #[test]
    fn test_delta_output_extends_to_input_end() {
        let cfg = DeltaConfig {
            sampling_rate: 10.0,
            delta_step_ratio: 0.1,
        };
        let input = sine_input();
        let (_, output) = digitizer().delta(&input, 1.0, &cfg);
        assert_relative_eq!(output.last().unwrap().x, input.last().unwrap().x);
    }

    #[test]
    fn test_delta_tracks_rising_signal() {
        // Against a rising ramp the tracker should emit mostly 1s
        let input: Vec<Point> = (0..100)
            .map(|i| Point::new(i as f64 * 0.01, i as f64 * 0.01))
            .collect();
        let cfg = DeltaConfig {
            sampling_rate: 100.0,
            delta_step_ratio: 0.02,
        };
        let (transmitted, _) = digitizer().delta(&input, 1.0, &cfg);
        let ones = transmitted.iter().filter(|p| p.y == 1.0).count();
        assert!(ones * 2 > transmitted.len());
    }

    #[test]
    fn test_config_validation() {
        assert!(PcmConfig {
            sampling_rate: 10.0,
            quantization_levels: 1
        }
        .validate()
        .is_err());
        assert!(PcmConfig {
            sampling_rate: 0.0,
            quantization_levels: 8
        }
        .validate()
        .is_err());
        assert!(DeltaConfig {
            sampling_rate: 10.0,
            delta_step_ratio: 0.0
        }
        .validate()
        .is_err());
        assert!(DeltaConfig {
            sampling_rate: 10.0,
            delta_step_ratio: 1.5
        }
        .validate()
        .is_err());
        assert!(DeltaConfig {
            sampling_rate: 10.0,
            delta_step_ratio: 1.0
        }
        .validate()
        .is_ok());
    }
}
