//! # devprint Core
//!
//! Pure primitives for device fingerprint composition: the fold hash, the
//! fixed signal catalogue, the ordered signal mapping, and the composite
//! identifier.
//!
//! This crate contains no I/O and touches no ambient capability. Everything
//! here is deterministic computation over strings.
//!
//! ## Key Types
//!
//! - [`Signal`] - One of the pre-declared signal names, in serialization order
//! - [`SignalValue`] - A genuine observation (text, integer, number, flag)
//! - [`Sentinel`] - Fixed failure marker substituted by a probe
//! - [`ProbeOutcome`] - Either a signal value or a sentinel, never an error
//! - [`SignalMapping`] - Ordered mapping from signal to outcome
//! - [`Identifier`] - The composite value, or a timestamped fallback
//! - [`LayeredDigests`] - SHA-256 digests over fixed field layers
//!
//! ## Hashing
//!
//! All compression goes through [`fold_hash`]. See the [`hash`] module.

pub mod digest;
pub mod error;
pub mod hash;
pub mod identifier;
pub mod mapping;
pub mod signal;

pub use digest::{layered_digests, Layer, LayerField, LayeredDigests, Sha256Hash};
pub use error::{CoreError, Result};
pub use hash::{fold_hash, hash_suffix, SUFFIX_LEN};
pub use identifier::Identifier;
pub use mapping::{SignalMapping, DEFAULT_DELIMITER};
pub use signal::{ProbeOutcome, Sentinel, Signal, SignalValue};
