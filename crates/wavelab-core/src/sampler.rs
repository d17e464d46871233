//! Waveform sampler
//!
//! Generates the canonical inputs shared by every transformation family:
//! a sampled sine wave for the analog families and a step waveform for the
//! digital families.

use crate::types::{Bits, Point};
use std::f64::consts::PI;

/// Sample a sine wave `A·sin(2πf·t)` over `[0, duration)`.
///
/// Sample `i` lands at `t = i / samples_per_sec`; the final sample is the
/// last instant strictly before `duration`.
pub fn analog_sine(
    frequency: f64,
    amplitude: f64,
    duration: f64,
    samples_per_sec: u32,
) -> Vec<Point> {
    let total = (duration * samples_per_sec as f64) as usize;
    let inv_rate = 1.0 / samples_per_sec as f64;
    let omega = 2.0 * PI * frequency;

    (0..total)
        .map(|i| {
            let t = i as f64 * inv_rate;
            Point::new(t, amplitude * (omega * t).sin())
        })
        .collect()
}

/// Render a bit sequence as a step waveform.
///
/// Each bit contributes two points at its own level (0 or 1), one at the
/// start and one at the end of its slot, so the result draws as a square
/// wave without any further interpolation.
pub fn digital_steps(bits: &Bits, bit_duration: f64) -> Vec<Point> {
    let mut points = Vec::with_capacity(bits.len() * 2);
    for (i, bit) in bits.iter().enumerate() {
        let level = bit as f64;
        points.push(Point::new(i as f64 * bit_duration, level));
        points.push(Point::new((i + 1) as f64 * bit_duration, level));
    }
    points
}
