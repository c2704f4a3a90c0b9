//! # devprint
//!
//! Semi-stable device identifiers from environment signals.
//!
//! ## Overview
//!
//! devprint samples a fixed, ordered set of signals (screen, navigator,
//! 2D and 3D rendering, audio, fonts, plugins), records each one in a
//! [`SignalMapping`], joins the values with `|`, and folds the result into
//! a 32-bit [`Identifier`]. The caller gets both the identifier and the raw
//! mapping.
//!
//! - Every probe is isolated: a failing capability becomes a sentinel such as
//!   `canvas_unavailable`, never an error.
//! - Generation never fails: if aggregation itself breaks, the identifier is
//!   `fallback_<millis>`.
//! - The identifier is not cryptographic and not unique. Devices with the
//!   same configuration collide by design of the signal set.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use devprint::{Capabilities, Fingerprinter, FingerprintConfig, SystemClock};
//!
//! async fn identify(display: impl devprint::DisplayMetrics + 'static,
//!                   navigator: impl devprint::Navigator + 'static)
//!     -> Result<(), devprint::ConfigError> {
//!     let caps = Capabilities::new(display, navigator, SystemClock::utc());
//!     let fingerprinter = Fingerprinter::new(caps, FingerprintConfig::default())?;
//!
//!     let fp = fingerprinter.generate().await;
//!     println!("{} {}", fp.identifier, fp.to_json().unwrap());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `devprint::core` - hashing, signals, mapping, identifier
//! - `devprint::probes` - capability traits and probes

pub mod config;
pub mod error;
pub mod fingerprinter;

pub use devprint_core as core;
pub use devprint_probes as probes;

pub use config::FingerprintConfig;
pub use error::{ConfigError, FingerprintError, Result};
pub use fingerprinter::{generate_fingerprint, Fingerprint, Fingerprinter};

pub use devprint_core::{
    fold_hash, hash_suffix, Identifier, Layer, LayeredDigests, ProbeOutcome, Sentinel, Sha256Hash,
    Signal, SignalMapping, SignalValue,
};
pub use devprint_probes::{
    AudioBackend, AudioGraph, Canvas2d, CanvasProvider, Capabilities, CapabilityError, Clock,
    DisplayMetrics, FontMetrics, GlContext, GraphicsProvider, Navigator, ProbeConfig, SystemClock,
};
