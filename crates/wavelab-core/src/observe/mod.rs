//! # Observability
//!
//! Structured logging for harnesses and embedding applications, built on
//! the `tracing` ecosystem.
//!
//! The transformation engines themselves never log — they are pure
//! functions whose only output is the returned waveforms — so everything
//! here serves the code *around* the engine: the benchmark harness, demo
//! binaries, and whatever service embeds the crate.
//!
//! ```rust,ignore
//! use wavelab_core::observe::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default());
//! tracing::info!(scheme = "HDB3", bits = 64, "encoding request");
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
