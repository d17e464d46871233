//! Engine entry points
//!
//! The transformation engines are pure and stateless per call; this module
//! is the thin layer in front of them that validates the request, builds
//! the shared input waveform, routes to the right engine, and packages the
//! three waveforms together with the measured computation time.
//!
//! Each family has a plain function using the default configuration and a
//! `_with` variant taking an explicit [`EngineConfig`], so callers (and
//! tests) can run the same algorithms at alternate sampling densities.
//!
//! All four functions are deterministic and referentially transparent:
//! identical inputs produce identical waveforms, so any number of calls may
//! run concurrently with no coordination. Validation failures are reported
//! as structured [`SignalError`]s before any computation begins; this layer
//! never logs or prints.

use crate::analog::{AnalogModulator, AnalogScheme};
use crate::config::EngineConfig;
use crate::digitize::{Digitize, Digitizer};
use crate::keying::{Keying, KeyingModulator};
use crate::linecode::{LineCode, LineCoder};
use crate::sampler;
use crate::types::{Bits, EngineResult, SignalError, SignalResult};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A routable request covering all four transformation families.
///
/// This is the serializable form of the call contract, for callers that
/// arrive through a wire or a queue rather than direct function calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum SignalRequest {
    LineCode {
        bits: String,
        scheme: LineCode,
    },
    DigitalModulate {
        bits: String,
        scheme: Keying,
    },
    AnalogToDigital {
        frequency: f64,
        amplitude: f64,
        #[serde(flatten)]
        method: Digitize,
    },
    AnalogModulate {
        message_frequency: f64,
        message_amplitude: f64,
        scheme: AnalogScheme,
    },
}

/// Route a request to the right engine under the default configuration.
pub fn simulate(request: &SignalRequest) -> EngineResult<SignalResult> {
    simulate_with(request, &EngineConfig::default())
}

/// Route a request to the right engine under an explicit configuration.
pub fn simulate_with(request: &SignalRequest, config: &EngineConfig) -> EngineResult<SignalResult> {
    match request {
        SignalRequest::LineCode { bits, scheme } => line_code_with(bits, *scheme, config),
        SignalRequest::DigitalModulate { bits, scheme } => {
            digital_modulate_with(bits, *scheme, config)
        }
        SignalRequest::AnalogToDigital {
            frequency,
            amplitude,
            method,
        } => analog_to_digital_with(*frequency, *amplitude, *method, config),
        SignalRequest::AnalogModulate {
            message_frequency,
            message_amplitude,
            scheme,
        } => analog_modulate_with(*message_frequency, *message_amplitude, *scheme, config),
    }
}

/// Encode a bit string under a line coding scheme (digital→digital).
pub fn line_code(bits: &str, scheme: LineCode) -> EngineResult<SignalResult> {
    line_code_with(bits, scheme, &EngineConfig::default())
}

/// [`line_code`] with an explicit configuration.
pub fn line_code_with(
    bits: &str,
    scheme: LineCode,
    config: &EngineConfig,
) -> EngineResult<SignalResult> {
    let started = Instant::now();
    config.line_code.validate()?;
    let bits = Bits::parse(bits)?;

    let input = sampler::digital_steps(&bits, config.line_code.bit_duration);
    let transmitted = LineCoder::new(&config.line_code).encode(&bits, scheme);
    let output = input.clone();

    Ok(package(input, transmitted, output, started))
}

/// Modulate a bit string onto a carrier (digital→analog).
pub fn digital_modulate(bits: &str, scheme: Keying) -> EngineResult<SignalResult> {
    digital_modulate_with(bits, scheme, &EngineConfig::default())
}

/// [`digital_modulate`] with an explicit configuration.
pub fn digital_modulate_with(
    bits: &str,
    scheme: Keying,
    config: &EngineConfig,
) -> EngineResult<SignalResult> {
    let started = Instant::now();
    config.keying.validate()?;
    let bits = Bits::parse(bits)?;

    let input = sampler::digital_steps(&bits, config.keying.bit_duration);
    let transmitted = KeyingModulator::new(&config.keying).modulate(&bits, scheme);
    let output = input.clone();

    Ok(package(input, transmitted, output, started))
}

/// Sample, encode and reconstruct an analog signal (analog→digital).
pub fn analog_to_digital(
    frequency: f64,
    amplitude: f64,
    method: Digitize,
) -> EngineResult<SignalResult> {
    analog_to_digital_with(frequency, amplitude, method, &EngineConfig::default())
}

/// [`analog_to_digital`] with an explicit configuration.
pub fn analog_to_digital_with(
    frequency: f64,
    amplitude: f64,
    method: Digitize,
    config: &EngineConfig,
) -> EngineResult<SignalResult> {
    let started = Instant::now();
    config.digitize.validate()?;
    require_positive("frequency", frequency)?;
    require_positive("amplitude", amplitude)?;
    method.validate()?;

    let digitizer = Digitizer::new(&config.digitize);
    let input = digitizer.sample_input(frequency, amplitude);
    let (transmitted, output) = match method {
        Digitize::Pcm(cfg) => digitizer.pcm(&input, amplitude, &cfg),
        Digitize::Delta(cfg) => digitizer.delta(&input, amplitude, &cfg),
    };

    Ok(package(input, transmitted, output, started))
}

/// Modulate a carrier by an analog message signal (analog→analog).
pub fn analog_modulate(
    message_frequency: f64,
    message_amplitude: f64,
    scheme: AnalogScheme,
) -> EngineResult<SignalResult> {
    analog_modulate_with(
        message_frequency,
        message_amplitude,
        scheme,
        &EngineConfig::default(),
    )
}

/// [`analog_modulate`] with an explicit configuration.
pub fn analog_modulate_with(
    message_frequency: f64,
    message_amplitude: f64,
    scheme: AnalogScheme,
    config: &EngineConfig,
) -> EngineResult<SignalResult> {
    let started = Instant::now();
    config.analog.validate()?;
    require_positive("message_frequency", message_frequency)?;
    require_positive("message_amplitude", message_amplitude)?;

    let input = sampler::analog_sine(
        message_frequency,
        message_amplitude,
        config.analog.duration,
        config.analog.samples_per_sec,
    );
    let transmitted = AnalogModulator::new(&config.analog).modulate(
        &input,
        message_frequency,
        message_amplitude,
        scheme,
    );
    let output = input.clone();

    Ok(package(input, transmitted, output, started))
}

fn require_positive(name: &str, value: f64) -> EngineResult<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(SignalError::InvalidParameter(format!(
            "{} must be positive and finite, got {}",
            name, value
        )));
    }
    Ok(())
}

fn package(
    input: Vec<crate::types::Point>,
    transmitted: Vec<crate::types::Point>,
    output: Vec<crate::types::Point>,
    started: Instant,
) -> SignalResult {
    SignalResult {
        input,
        transmitted,
        output,
        calculation_time_ms: started.elapsed().as_secs_f64() * 1e3,
    }
}
