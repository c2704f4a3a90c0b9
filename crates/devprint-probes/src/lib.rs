//! # devprint Probes
//!
//! Fault-isolated signal extractors and the capability traits they read
//! from.
//!
//! ## Overview
//!
//! Every probe takes explicit capabilities (never a global) and returns a
//! [`ProbeOutcome`]: either a genuine signal or the probe's sentinel. No
//! probe returns an error and no probe can stop another from running.
//!
//! | Signal                 | Probe                               | Sentinels                            |
//! |------------------------|-------------------------------------|--------------------------------------|
//! | display fields         | [`display`]                         | none                                 |
//! | navigator, timezone    | [`navigator`]                       | none (zero/empty defaults)           |
//! | `canvas_hash`          | [`canvas::canvas_hash`]             | `canvas_unavailable`                 |
//! | `webgl_hash`           | [`webgl::webgl_hash`]               | `webgl_unavailable`, `webgl_error`   |
//! | `audio_hash`           | [`audio::audio_hash`]               | `audio_unavailable`, `audio_error`   |
//! | `fonts_hash`           | [`fonts::fonts_hash`]               | `fonts_error`                        |
//! | `plugins_hash`         | [`plugins::plugins_hash`]           | `plugins_error`                      |
//!
//! The canvas and audio probes are the only ones that await.

pub mod audio;
pub mod canvas;
pub mod capabilities;
pub mod config;
pub mod display;
pub mod error;
pub mod fonts;
pub mod navigator;
pub mod plugins;
pub mod webgl;

pub use capabilities::{
    AudioBackend, AudioGraph, Canvas2d, CanvasProvider, Capabilities, Clock, DisplayMetrics,
    DrawCommand, FontMetrics, GlContext, GlParameter, GraphicsProvider, Navigator,
    OscillatorSpec, PluginInfo, ScreenInfo, SystemClock, Waveform, DEBUG_RENDERER_INFO,
};
pub use config::ProbeConfig;
pub use error::{CapabilityError, Result};

use devprint_core::{ProbeOutcome, Signal};

/// The fixed, ordered probe set.
#[derive(Debug, Clone, Default)]
pub struct ProbeSet {
    config: ProbeConfig,
}

impl ProbeSet {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run the probe for `signal`.
    ///
    /// Returns `None` for [`Signal::Timestamp`], which is taken from the
    /// clock by the caller rather than probed.
    pub async fn probe(&self, signal: Signal, caps: &Capabilities) -> Option<ProbeOutcome> {
        let display = caps.display.as_ref();
        let navigator = caps.navigator.as_ref();
        let suffix_len = self.config.hash_suffix_len;

        let outcome = match signal {
            Signal::ScreenResolution => display::screen_resolution(display),
            Signal::UserAgentHash => navigator::user_agent_hash(navigator),
            Signal::TimezoneOffset => navigator::timezone_offset(caps.clock.as_ref()),
            Signal::Language => navigator::language(navigator),
            Signal::Platform => navigator::platform(navigator),
            Signal::HardwareConcurrency => navigator::hardware_concurrency(navigator),
            Signal::Memory => navigator::memory(navigator),
            Signal::ColorDepth => display::color_depth(display),
            Signal::PixelDepth => display::pixel_depth(display),
            Signal::AvailableResolution => display::available_resolution(display),
            Signal::TouchSupport => navigator::touch_support(navigator),
            Signal::CanvasHash => canvas::canvas_hash(caps.canvas.as_deref(), suffix_len).await,
            Signal::WebglHash => webgl::webgl_hash(caps.graphics.as_deref(), suffix_len),
            Signal::AudioHash => {
                audio::audio_hash(
                    caps.audio.as_deref(),
                    &self.config.oscillator,
                    self.config.audio_bins,
                    suffix_len,
                )
                .await
            }
            Signal::FontsHash => fonts::fonts_hash(caps.fonts.as_deref(), &self.config),
            Signal::PluginsHash => plugins::plugins_hash(navigator, suffix_len),
            Signal::Timestamp => return None,
        };
        Some(outcome)
    }
}
