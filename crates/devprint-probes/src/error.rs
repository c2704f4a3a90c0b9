//! Error types for capability access.

use thiserror::Error;

/// A fault raised by an ambient capability.
///
/// Probes never propagate these: each one is converted to the probe's
/// sentinel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// The host does not implement the API.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The API exists but the host refused access.
    #[error("blocked: {0}")]
    Blocked(String),

    /// The API was called and failed.
    #[error("failed: {0}")]
    Failed(String),

    /// The system clock is unusable.
    #[error("clock error: {0}")]
    Clock(String),
}

/// Result type for capability calls.
pub type Result<T> = std::result::Result<T, CapabilityError>;
