//! Error types for devprint Core.

use thiserror::Error;

use crate::signal::Signal;

/// Errors raised while assembling or serializing a signal mapping.
///
/// None of these reach a caller of the aggregator; they select the
/// fallback identifier instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("signal {0} recorded twice")]
    DuplicateSignal(Signal),

    #[error("signal {signal} recorded after {after}")]
    OutOfOrder { signal: Signal, after: Signal },

    #[error("mapping is missing {} signal(s), first {}", .missing.len(), first_missing(.missing))]
    IncompleteMapping { missing: Vec<Signal> },
}

fn first_missing(missing: &[Signal]) -> &'static str {
    missing.first().map(Signal::as_str).unwrap_or("none")
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
