//! Capability traits: the explicit ambient inputs every probe reads from.
//!
//! Nothing in this crate reaches for a global. A host builds a
//! [`Capabilities`] bundle from whatever it has (a browser binding, a test
//! fake) and hands it to the probes. Display, navigator, and clock are
//! always present; rendering, audio, and font metrics are optional and a
//! missing one selects that probe's "unavailable" sentinel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{CapabilityError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Display, navigator, clock
// ─────────────────────────────────────────────────────────────────────────────

/// Screen properties. Assumed present on every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub pixel_depth: u32,
    pub avail_width: u32,
    pub avail_height: u32,
}

pub trait DisplayMetrics {
    fn screen(&self) -> ScreenInfo;
}

/// One entry of the plugin registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
}

/// Navigator metadata. Optional properties return `None` when the host
/// does not expose them.
pub trait Navigator {
    fn user_agent(&self) -> String;

    fn language(&self) -> Option<String>;

    fn platform(&self) -> Option<String>;

    fn hardware_concurrency(&self) -> Option<u32>;

    /// Approximate device memory in GiB; may be fractional.
    fn device_memory(&self) -> Option<f64>;

    /// Whether touch events are exposed at all.
    fn touch_events_supported(&self) -> bool;

    fn max_touch_points(&self) -> Option<u32>;

    /// Enumerate the plugin registry.
    fn plugins(&self) -> Result<Vec<PluginInfo>>;
}

/// Wall clock and local timezone.
pub trait Clock {
    /// Current time in Unix milliseconds.
    fn now_millis(&self) -> Result<i64>;

    /// Minutes to add to local time to reach UTC (positive west of UTC).
    fn timezone_offset_minutes(&self) -> i32;
}

/// Clock backed by `SystemTime`, with a fixed timezone offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset_minutes: i32,
}

impl SystemClock {
    /// A clock reporting UTC.
    pub const fn utc() -> Self {
        Self { offset_minutes: 0 }
    }

    /// A clock reporting the given timezone offset.
    pub const fn with_offset(offset_minutes: i32) -> Self {
        Self { offset_minutes }
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> Result<i64> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| CapabilityError::Clock(e.to_string()))?;
        i64::try_from(since_epoch.as_millis())
            .map_err(|e| CapabilityError::Clock(e.to_string()))
    }

    fn timezone_offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 2D surface and font metrics
// ─────────────────────────────────────────────────────────────────────────────

/// A single drawing operation on a 2D surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    TextBaseline(&'static str),
    Font(&'static str),
    FillStyle(&'static str),
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    FillText { text: &'static str, x: f64, y: f64 },
    BeginPath,
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Fill,
}

/// Factory for offscreen 2D surfaces.
pub trait CanvasProvider {
    fn create_2d(&self) -> Result<Box<dyn Canvas2d>>;
}

/// An offscreen 2D drawing surface.
#[async_trait(?Send)]
pub trait Canvas2d {
    fn draw(&mut self, command: &DrawCommand) -> Result<()>;

    /// Serialize the pixel buffer to its textual (data URL) encoding.
    async fn to_data_url(&mut self) -> Result<String>;
}

/// Rendered text measurement.
pub trait FontMetrics {
    /// Width of `text` rendered with the CSS font shorthand `font`.
    fn measure_text(&self, font: &str, text: &str) -> Result<f64>;
}

// ─────────────────────────────────────────────────────────────────────────────
// 3D context
// ─────────────────────────────────────────────────────────────────────────────

/// Extension that exposes unmasked vendor and renderer strings.
pub const DEBUG_RENDERER_INFO: &str = "WEBGL_debug_renderer_info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlParameter {
    Vendor,
    Renderer,
    Version,
    UnmaskedVendor,
    UnmaskedRenderer,
}

/// Source of hardware-accelerated 3D contexts.
pub trait GraphicsProvider {
    /// `Ok(None)` when the host cannot create a context.
    fn context(&self) -> Result<Option<Box<dyn GlContext>>>;
}

pub trait GlContext {
    fn has_extension(&self, name: &str) -> bool;

    fn parameter(&self, param: GlParameter) -> Result<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Audio
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Oscillator settings for the audio probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorSpec {
    pub waveform: Waveform,
    pub frequency_hz: f64,
    /// Gain applied before the destination; zero keeps the graph silent.
    pub gain: f64,
}

impl Default for OscillatorSpec {
    fn default() -> Self {
        Self {
            waveform: Waveform::Triangle,
            frequency_hz: 1000.0,
            gain: 0.0,
        }
    }
}

/// Entry point to the audio subsystem.
pub trait AudioBackend {
    /// Open a fresh audio context.
    fn open(&self) -> Result<Box<dyn AudioGraph>>;
}

/// A live audio context holding an oscillator → analyser → gain chain.
///
/// `stop` and `close` are infallible from the caller's point of view and
/// must tolerate being called after a failed step.
#[async_trait(?Send)]
pub trait AudioGraph {
    /// Build oscillator → analyser → gain → destination.
    fn connect(&mut self, spec: &OscillatorSpec) -> Result<()>;

    fn start(&mut self) -> Result<()>;

    /// Byte frequency data from the analyser.
    async fn frequency_data(&mut self) -> Result<Vec<u8>>;

    fn stop(&mut self);

    fn close(&mut self);
}

// ─────────────────────────────────────────────────────────────────────────────
// Bundle
// ─────────────────────────────────────────────────────────────────────────────

/// Every ambient input the probes consume.
pub struct Capabilities {
    pub display: Box<dyn DisplayMetrics>,
    pub navigator: Box<dyn Navigator>,
    pub clock: Box<dyn Clock>,
    pub canvas: Option<Box<dyn CanvasProvider>>,
    pub graphics: Option<Box<dyn GraphicsProvider>>,
    pub audio: Option<Box<dyn AudioBackend>>,
    pub fonts: Option<Box<dyn FontMetrics>>,
}

impl Capabilities {
    /// Bundle the required capabilities; optional ones start absent.
    pub fn new(
        display: impl DisplayMetrics + 'static,
        navigator: impl Navigator + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            display: Box::new(display),
            navigator: Box::new(navigator),
            clock: Box::new(clock),
            canvas: None,
            graphics: None,
            audio: None,
            fonts: None,
        }
    }

    pub fn with_canvas(mut self, canvas: impl CanvasProvider + 'static) -> Self {
        self.canvas = Some(Box::new(canvas));
        self
    }

    pub fn with_graphics(mut self, graphics: impl GraphicsProvider + 'static) -> Self {
        self.graphics = Some(Box::new(graphics));
        self
    }

    pub fn with_audio(mut self, audio: impl AudioBackend + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn with_fonts(mut self, fonts: impl FontMetrics + 'static) -> Self {
        self.fonts = Some(Box::new(fonts));
        self
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("screen", &self.display.screen())
            .field("canvas", &self.canvas.is_some())
            .field("graphics", &self.graphics.is_some())
            .field("audio", &self.audio.is_some())
            .field("fonts", &self.fonts.is_some())
            .finish()
    }
}
