//! Audio-path probe.
//!
//! Builds a muted oscillator → analyser → gain chain, samples the leading
//! frequency bins, and folds them. The graph is held by [`GraphGuard`], so
//! the oscillator is stopped and the context closed however the probe
//! exits.

use devprint_core::{hash_suffix, ProbeOutcome, Sentinel};
use tracing::debug;

use crate::capabilities::{AudioBackend, AudioGraph, OscillatorSpec};
use crate::error::Result;

/// Owns an open audio graph and releases it on drop.
pub struct GraphGuard {
    graph: Box<dyn AudioGraph>,
    started: bool,
}

impl GraphGuard {
    pub fn new(graph: Box<dyn AudioGraph>) -> Self {
        Self {
            graph,
            started: false,
        }
    }

    pub fn connect(&mut self, spec: &OscillatorSpec) -> Result<()> {
        self.graph.connect(spec)
    }

    pub fn start(&mut self) -> Result<()> {
        self.graph.start()?;
        self.started = true;
        Ok(())
    }

    pub async fn frequency_data(&mut self) -> Result<Vec<u8>> {
        self.graph.frequency_data().await
    }
}

impl Drop for GraphGuard {
    fn drop(&mut self) {
        if self.started {
            self.graph.stop();
        }
        self.graph.close();
    }
}

/// Run the audio probe.
///
/// `audio_unavailable` when there is no audio subsystem, `audio_error` for
/// any other fault.
pub async fn audio_hash(
    audio: Option<&dyn AudioBackend>,
    spec: &OscillatorSpec,
    bins: usize,
    suffix_len: usize,
) -> ProbeOutcome {
    let Some(backend) = audio else {
        return Sentinel::AudioUnavailable.into();
    };
    match sample(backend, spec, bins).await {
        Ok(joined) => ProbeOutcome::signal(hash_suffix(&joined, suffix_len)),
        Err(e) => {
            debug!(error = %e, "audio probe failed");
            Sentinel::AudioError.into()
        }
    }
}

/// Leading `bins` values concatenated without a separator.
async fn sample(backend: &dyn AudioBackend, spec: &OscillatorSpec, bins: usize) -> Result<String> {
    let mut guard = GraphGuard::new(backend.open()?);
    guard.connect(spec)?;
    guard.start()?;
    let data = guard.frequency_data().await?;
    drop(guard);

    Ok(data.iter().take(bins).map(u8::to_string).collect())
}
