//! Error types for devprint.

use devprint_core::CoreError;
use devprint_probes::CapabilityError;
use thiserror::Error;

/// Aggregation-level faults.
///
/// These never leave [`Fingerprinter::generate`](crate::Fingerprinter::generate):
/// any of them selects the fallback identifier.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// Mapping assembly or serialization failed.
    #[error("mapping error: {0}")]
    Mapping(#[from] CoreError),

    /// The clock could not supply the generation timestamp.
    #[error("clock error: {0}")]
    Clock(#[from] CapabilityError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for aggregation.
pub type Result<T> = std::result::Result<T, FingerprintError>;
