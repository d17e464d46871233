//! Core types for the signal transformation engine
//!
//! This module defines the fundamental types shared by every transformation
//! family: time-indexed waveform points, the three-waveform result bundle,
//! validated bit sequences, and the engine error taxonomy.
//!
//! ## The three waveforms
//!
//! Every simulation produces the same triple:
//!
//! ```text
//!   input        the pre-transformation waveform (sine or bit steps)
//!   transmitted  the encoded / modulated line signal
//!   output       the receiver-side reconstruction
//! ```
//!
//! For digital-to-digital and digital-to-analog families the output equals
//! the input: the channel is ideal and decoding is assumed perfect, so only
//! the line signal differs.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An in-phase/quadrature pair, used for constellation tables
pub type IqPoint = Complex64;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, SignalError>;

/// A single time-indexed sample.
///
/// `x` is time in seconds, `y` is the level/voltage/amplitude (or, for PCM
/// transmitted signals, the integer quantization index). Sequences of points
/// are ordered ascending by `x`; duplicate `x` values are permitted at code
/// transitions so vertical jumps render correctly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The full result of one transformation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalResult {
    /// Pre-transformation waveform
    pub input: Vec<Point>,
    /// Encoded/modulated line signal
    pub transmitted: Vec<Point>,
    /// Receiver-side reconstruction
    pub output: Vec<Point>,
    /// Wall-clock time spent computing, in milliseconds
    pub calculation_time_ms: f64,
}

/// Errors that can occur during a transformation call
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignalError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// A validated bit sequence.
///
/// Parsed once from a `'0'/'1'` string at the engine boundary; the encoding
/// engines index it freely without re-validating. Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bits(Vec<u8>);

impl Bits {
    /// Parse a binary string.
    ///
    /// Rejects empty strings and any character other than `'0'` or `'1'`.
    pub fn parse(s: &str) -> EngineResult<Self> {
        if s.is_empty() {
            return Err(SignalError::InvalidInput("empty bit string".into()));
        }
        let mut bits = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push(0),
                '1' => bits.push(1),
                other => {
                    return Err(SignalError::InvalidInput(format!(
                        "bit string may only contain '0' and '1', found {:?}",
                        other
                    )))
                }
            }
        }
        Ok(Self(bits))
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a parsed sequence; present for slice-like ergonomics
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bit value (0 or 1) at position `i`
    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        self.0[i]
    }

    /// The underlying bit values
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Iterate over bit values
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// True when `run` consecutive bits starting at `start` are all zero.
    ///
    /// Lookahead reads the original sequence, so overlapping run candidates
    /// can never be double-counted by a scanning encoder.
    pub fn zero_run_at(&self, start: usize, run: usize) -> bool {
        match start.checked_add(run) {
            Some(end) if end <= self.0.len() => self.0[start..end].iter().all(|&b| b == 0),
            _ => false,
        }
    }

    /// Bitwise complement (0 ↔ 1)
    pub fn complement(&self) -> Self {
        Self(self.0.iter().map(|&b| 1 - b).collect())
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Bits {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical form used by every scheme-name registry: uppercase with
/// separators stripped, so "NRZ-L", "nrz_l" and "NRZL" all match.
pub(crate) fn canonical_scheme_name(s: &str) -> String {
    s.to_uppercase().replace(['-', '_', ' '], "")
}
