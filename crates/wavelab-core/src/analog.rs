//! Analog modulation (analog→analog)
//!
//! Modulates a unit-amplitude carrier by the message signal's instantaneous
//! value. The carrier frequency is tied to the message frequency (5× by
//! default) so one screenful always shows a few carrier cycles per message
//! cycle regardless of the chosen message frequency.

use crate::config::AnalogModParams;
use crate::types::{canonical_scheme_name, Point, SignalError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Analog modulation scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalogScheme {
    Am,
    Fm,
    Pm,
}

impl AnalogScheme {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            AnalogScheme::Am => "AM",
            AnalogScheme::Fm => "FM",
            AnalogScheme::Pm => "PM",
        }
    }

    /// All schemes, in presentation order
    pub fn all() -> [AnalogScheme; 3] {
        [AnalogScheme::Am, AnalogScheme::Fm, AnalogScheme::Pm]
    }
}

impl fmt::Display for AnalogScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for AnalogScheme {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_scheme_name(s).as_str() {
            "AM" => Ok(AnalogScheme::Am),
            "FM" => Ok(AnalogScheme::Fm),
            "PM" => Ok(AnalogScheme::Pm),
            _ => Err(SignalError::UnsupportedScheme(s.to_string())),
        }
    }
}

/// Analog modulator.
#[derive(Debug, Clone)]
pub struct AnalogModulator {
    params: AnalogModParams,
}

impl AnalogModulator {
    pub fn new(params: &AnalogModParams) -> Self {
        Self {
            params: params.clone(),
        }
    }

    /// Modulate the carrier by `input`, the sampled message signal.
    ///
    /// `message_frequency` and `message_amplitude` are the parameters the
    /// message was generated with; the message samples are normalized to
    /// [-1, 1] by the amplitude before entering the phase/envelope terms.
    ///
    /// The FM phase term is the instantaneous form
    /// `2π·Δf·m(t)·t / f_message` rather than the integral of the message;
    /// it is the form this family of teaching visualisations has always
    /// drawn, and reproducing those plots exactly matters more here than
    /// textbook FM.
    pub fn modulate(
        &self,
        input: &[Point],
        message_frequency: f64,
        message_amplitude: f64,
        scheme: AnalogScheme,
    ) -> Vec<Point> {
        let p = &self.params;
        let carrier_freq = message_frequency * p.carrier_ratio;
        let omega_c = 2.0 * PI * carrier_freq;
        let inv_amp = 1.0 / message_amplitude;

        match scheme {
            AnalogScheme::Am => {
                let index = p.am_modulation_index;
                input
                    .iter()
                    .map(|s| {
                        let msg = s.y * inv_amp;
                        let envelope = p.carrier_amplitude * (1.0 + index * msg);
                        Point::new(s.x, envelope * (omega_c * s.x).sin())
                    })
                    .collect()
            }
            AnalogScheme::Fm => {
                let freq_dev = carrier_freq * p.fm_deviation_ratio;
                let omega_dev = 2.0 * PI * freq_dev;
                let inv_msg_freq = 1.0 / message_frequency;
                input
                    .iter()
                    .map(|s| {
                        let msg = s.y * inv_amp;
                        let phase = omega_c * s.x + omega_dev * msg * s.x * inv_msg_freq;
                        Point::new(s.x, p.carrier_amplitude * phase.sin())
                    })
                    .collect()
            }
            AnalogScheme::Pm => {
                let dev = p.pm_phase_deviation;
                input
                    .iter()
                    .map(|s| {
                        let msg = s.y * inv_amp;
                        let phase = omega_c * s.x + dev * msg;
                        Point::new(s.x, p.carrier_amplitude * phase.sin())
                    })
                    .collect()
            }
        }
    }
}
