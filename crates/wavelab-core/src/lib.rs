//! # Signal Transformation Engine
//!
//! This crate simulates the four classical data-transmission
//! transformations used in teaching computer communications. For a chosen
//! algorithm and parameter set it deterministically produces three
//! time-indexed waveforms — the original signal, the transmitted line
//! signal, and the reconstructed output — ready for display or for the
//! benchmark harness.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     engine (dispatch layer)                     │
//! │   line_code  digital_modulate  analog_to_digital  analog_mod    │
//! └──────┬───────────┬────────────────┬──────────────────┬──────────┘
//!        ▼           ▼                ▼                  ▼
//! ┌───────────┐ ┌──────────┐ ┌─────────────────┐ ┌──────────────┐
//! │ linecode  │ │  keying  │ │    digitize     │ │    analog    │
//! │ (dig→dig) │ │(dig→ana) │ │   (ana→dig)     │ │  (ana→ana)   │
//! └─────┬─────┘ └────┬─────┘ └───────┬─────────┘ └──────┬───────┘
//!       │            │               │                  │
//!       └────────────┴───────┬───────┴──────────────────┘
//!                            ▼
//!                 ┌─────────────────────┐
//!                 │  sampler · interp   │
//!                 └─────────────────────┘
//! ```
//!
//! The engines are pure: no shared mutable state exists between calls, so
//! any number of calls may run concurrently without coordination. The
//! transmitted waveforms are idealized, noiseless educational
//! approximations — there is no channel model and no error injection.
//!
//! ## Example
//!
//! ```rust
//! use wavelab_core::engine;
//! use wavelab_core::linecode::LineCode;
//!
//! let result = engine::line_code("10110", LineCode::Manchester).unwrap();
//! assert_eq!(result.transmitted.len(), 4 * 5); // four points per bit
//! assert_eq!(result.output, result.input);     // ideal channel
//! ```

pub mod analog;
pub mod benchmark;
pub mod config;
pub mod digitize;
pub mod engine;
pub mod interp;
pub mod keying;
pub mod linecode;
pub mod observe;
pub mod sampler;
pub mod types;

pub use config::EngineConfig;
pub use engine::{
    analog_modulate, analog_to_digital, digital_modulate, line_code, simulate, SignalRequest,
};
pub use types::{Bits, EngineResult, Point, SignalError, SignalResult};

/// Commonly used items for glob import.
pub mod prelude {
    pub use crate::analog::AnalogScheme;
    pub use crate::config::EngineConfig;
    pub use crate::digitize::{DeltaConfig, Digitize, PcmConfig};
    pub use crate::engine::{
        analog_modulate, analog_to_digital, digital_modulate, line_code, simulate, SignalRequest,
    };
    pub use crate::keying::Keying;
    pub use crate::linecode::LineCode;
    pub use crate::types::{Bits, EngineResult, Point, SignalError, SignalResult};
}
