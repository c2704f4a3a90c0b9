//! The Fingerprinter: runs the probe set and folds the mapping.
//!
//! Failure is handled in two tiers. Each probe turns its own faults into a
//! sentinel. Anything the probes cannot absorb (a broken clock, a mapping
//! that fails to serialize) is caught here and replaced by the
//! `fallback_<millis>` identifier. [`Fingerprinter::generate`] never fails.

use serde::Serialize;
use tracing::{debug, error, warn};

use devprint_core::{
    layered_digests, Identifier, LayeredDigests, ProbeOutcome, Signal, SignalMapping,
};
use devprint_probes::{Capabilities, Clock, ProbeSet, SystemClock};

use crate::config::FingerprintConfig;
use crate::error::{ConfigError, Result};

/// The result of one fingerprinting run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fingerprint {
    /// Composite identifier, or the timestamped fallback.
    #[serde(rename = "fingerprint")]
    pub identifier: Identifier,
    /// Every signal collected, in declared order. Partial after a fallback.
    #[serde(rename = "components")]
    pub mapping: SignalMapping,
}

impl Fingerprint {
    pub fn is_fallback(&self) -> bool {
        self.identifier.is_fallback()
    }

    /// JSON in the shape hosts consume: `{"fingerprint": .., "components": {..}}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Collects signals from a set of capabilities.
pub struct Fingerprinter {
    capabilities: Capabilities,
    probes: ProbeSet,
    config: FingerprintConfig,
}

impl Fingerprinter {
    /// Build a fingerprinter, rejecting a config that fails
    /// [`FingerprintConfig::validate`].
    pub fn new(
        capabilities: Capabilities,
        config: FingerprintConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(capabilities, config))
    }

    pub fn with_defaults(capabilities: Capabilities) -> Self {
        Self::build(capabilities, FingerprintConfig::default())
    }

    fn build(capabilities: Capabilities, config: FingerprintConfig) -> Self {
        Self {
            capabilities,
            probes: ProbeSet::new(config.probes.clone()),
            config,
        }
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Run every probe and fold the result.
    ///
    /// Always returns a fingerprint. If aggregation fails, the identifier is
    /// the fallback and the mapping holds whatever was collected first.
    pub async fn generate(&self) -> Fingerprint {
        let mut mapping = SignalMapping::new();
        let identifier = match self.try_generate(&mut mapping).await {
            Ok(identifier) => identifier,
            Err(e) => {
                let generated_at = self.fallback_time();
                error!(
                    error = %e,
                    collected = mapping.len(),
                    generated_at,
                    "fingerprint generation failed, using fallback"
                );
                Identifier::fallback(generated_at)
            }
        };
        Fingerprint {
            identifier,
            mapping,
        }
    }

    /// Generation time for the fallback: the capability clock, else the
    /// system clock, else 0.
    fn fallback_time(&self) -> i64 {
        self.capabilities
            .clock
            .now_millis()
            .or_else(|_| SystemClock::utc().now_millis())
            .unwrap_or_default()
    }

    async fn try_generate(&self, mapping: &mut SignalMapping) -> Result<Identifier> {
        for signal in Signal::ALL {
            let outcome = match self.probes.probe(signal, &self.capabilities).await {
                Some(outcome) => outcome,
                None => ProbeOutcome::signal(self.capabilities.clock.now_millis()?),
            };
            match outcome.sentinel() {
                Some(sentinel) => warn!(%signal, %sentinel, "probe degraded"),
                None => debug!(%signal, "probe ok"),
            }
            mapping.record(signal, outcome)?;
        }
        let hash = mapping.composite_hash(self.config.delimiter)?;
        Ok(Identifier::Hash(hash))
    }

    /// Composite identifier of `mapping` with the timestamp left out.
    pub fn stable_identifier(&self, mapping: &SignalMapping) -> Result<Identifier> {
        Ok(Identifier::Hash(mapping.stable_hash(self.config.delimiter)?))
    }

    /// SHA-256 layer digests of `mapping`.
    pub fn layered_digests(&self, mapping: &SignalMapping) -> LayeredDigests {
        layered_digests(mapping)
    }
}

/// Fingerprint `capabilities` with the default configuration.
pub async fn generate_fingerprint(capabilities: Capabilities) -> Fingerprint {
    Fingerprinter::with_defaults(capabilities).generate().await
}
