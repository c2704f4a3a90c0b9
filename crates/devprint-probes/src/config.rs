//! Probe tuning.

use serde::{Deserialize, Serialize};

use devprint_core::SUFFIX_LEN;

use crate::capabilities::OscillatorSpec;

/// Settings shared by the probe set.
///
/// Changing any default changes every identifier produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Trailing characters kept from each per-probe hash.
    pub hash_suffix_len: usize,
    /// Font names tested for availability.
    pub font_candidates: Vec<String>,
    /// Generic families each candidate is layered over.
    pub font_baselines: Vec<String>,
    /// Text measured under every font.
    pub font_test_string: String,
    /// CSS size prefix for measured fonts.
    pub font_size: String,
    /// Leading analyser bins folded into the audio signal.
    pub audio_bins: usize,
    pub oscillator: OscillatorSpec,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            hash_suffix_len: SUFFIX_LEN,
            font_candidates: [
                "Arial",
                "Times New Roman",
                "Courier New",
                "Helvetica",
                "Comic Sans MS",
                "Impact",
                "Trebuchet MS",
                "Verdana",
                "Georgia",
                "Palatino",
                "Apple Color Emoji",
                "Segoe UI Emoji",
                "Noto Color Emoji",
            ]
            .map(String::from)
            .to_vec(),
            font_baselines: ["monospace", "sans-serif", "serif"]
                .map(String::from)
                .to_vec(),
            font_test_string: "mmmmmmmmmmlli".to_string(),
            font_size: "72px".to_string(),
            audio_bins: 30,
            oscillator: OscillatorSpec::default(),
        }
    }
}
