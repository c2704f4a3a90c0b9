//! Fingerprinter configuration.

use serde::{Deserialize, Serialize};

use devprint_core::DEFAULT_DELIMITER;
use devprint_probes::ProbeConfig;

use crate::error::ConfigError;

/// Configuration for the [`Fingerprinter`](crate::Fingerprinter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Character placed between values in the serialized composite.
    pub delimiter: char,
    /// Probe tuning.
    pub probes: ProbeConfig,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            probes: ProbeConfig::default(),
        }
    }
}

impl FingerprintConfig {
    /// Parse and validate a JSON config. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every identifier degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probes.hash_suffix_len == 0 {
            return Err(ConfigError::Invalid {
                field: "probes.hash_suffix_len",
                reason: "must keep at least one character".into(),
            });
        }
        if self.probes.font_baselines.is_empty() {
            return Err(ConfigError::Invalid {
                field: "probes.font_baselines",
                reason: "at least one generic family is required".into(),
            });
        }
        if self.probes.audio_bins == 0 {
            return Err(ConfigError::Invalid {
                field: "probes.audio_bins",
                reason: "must sample at least one bin".into(),
            });
        }
        if self.delimiter.is_ascii_alphanumeric() {
            return Err(ConfigError::Invalid {
                field: "delimiter",
                reason: format!("{:?} collides with signal text", self.delimiter),
            });
        }
        Ok(())
    }
}
