//! Simulated capabilities.
//!
//! Each fake is deterministic: the same fake produces the same signal on
//! every call. [`SimulatedEnvironment`] bundles one of each and can switch
//! any capability off or make it fail.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use devprint_probes::{
    AudioBackend, AudioGraph, Canvas2d, CanvasProvider, CapabilityError, Capabilities, Clock,
    DisplayMetrics, DrawCommand, FontMetrics, GlContext, GlParameter, GraphicsProvider,
    Navigator, OscillatorSpec, PluginInfo, Result, ScreenInfo, DEBUG_RENDERER_INFO,
};

use crate::vectors::MINIMAL_USER_AGENT;

/// Fixed generation time used by the fixtures (2025-01-14T16:00:00Z).
pub const FIXED_NOW: i64 = 1_736_870_400_000;

// ─────────────────────────────────────────────────────────────────────────────
// Display, navigator, clock
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeDisplay(pub ScreenInfo);

impl FakeDisplay {
    pub fn full_hd() -> Self {
        Self(ScreenInfo {
            width: 1920,
            height: 1080,
            color_depth: 24,
            pixel_depth: 24,
            avail_width: 1920,
            avail_height: 1040,
        })
    }
}

impl DisplayMetrics for FakeDisplay {
    fn screen(&self) -> ScreenInfo {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeNavigator {
    pub user_agent: String,
    pub language: Option<String>,
    pub platform: Option<String>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    pub touch_events: bool,
    pub max_touch_points: Option<u32>,
    pub plugins: std::result::Result<Vec<PluginInfo>, CapabilityError>,
}

impl FakeNavigator {
    /// Desktop Chrome on Linux with no plugins exposed.
    pub fn linux_chrome() -> Self {
        Self {
            user_agent: MINIMAL_USER_AGENT.to_string(),
            language: Some("en-US".to_string()),
            platform: Some("Linux x86_64".to_string()),
            hardware_concurrency: Some(8),
            device_memory: Some(8.0),
            touch_events: false,
            max_touch_points: Some(0),
            plugins: Ok(vec![]),
        }
    }

    pub fn with_plugins(mut self, plugins: &[(&str, &str)]) -> Self {
        self.plugins = Ok(plugins
            .iter()
            .map(|(name, version)| PluginInfo {
                name: name.to_string(),
                version: version.to_string(),
            })
            .collect());
        self
    }

    pub fn with_blocked_plugins(mut self) -> Self {
        self.plugins = Err(CapabilityError::Blocked("navigator.plugins".into()));
        self
    }
}

impl Navigator for FakeNavigator {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn platform(&self) -> Option<String> {
        self.platform.clone()
    }

    fn hardware_concurrency(&self) -> Option<u32> {
        self.hardware_concurrency
    }

    fn device_memory(&self) -> Option<f64> {
        self.device_memory
    }

    fn touch_events_supported(&self) -> bool {
        self.touch_events
    }

    fn max_touch_points(&self) -> Option<u32> {
        self.max_touch_points
    }

    fn plugins(&self) -> Result<Vec<PluginInfo>> {
        self.plugins.clone()
    }
}

/// A clock stuck at one instant, or one that always fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub now: Option<i64>,
    pub offset_minutes: i32,
}

impl FixedClock {
    pub const fn at(now: i64, offset_minutes: i32) -> Self {
        Self {
            now: Some(now),
            offset_minutes,
        }
    }

    pub const fn broken(offset_minutes: i32) -> Self {
        Self {
            now: None,
            offset_minutes,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> Result<i64> {
        self.now
            .ok_or_else(|| CapabilityError::Clock("clock unavailable".into()))
    }

    fn timezone_offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

/// A clock that advances by `step` milliseconds on every read.
#[derive(Debug, Clone)]
pub struct TickingClock {
    next: Rc<Cell<i64>>,
    step: i64,
    offset_minutes: i32,
}

impl TickingClock {
    pub fn new(start: i64, step: i64, offset_minutes: i32) -> Self {
        Self {
            next: Rc::new(Cell::new(start)),
            step,
            offset_minutes,
        }
    }
}

impl Clock for TickingClock {
    fn now_millis(&self) -> Result<i64> {
        let now = self.next.get();
        self.next.set(now + self.step);
        Ok(now)
    }

    fn timezone_offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 2D surface and fonts
// ─────────────────────────────────────────────────────────────────────────────

/// Where a simulated canvas breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasFault {
    CreateBlocked,
    DrawFails,
    ReadbackBlocked,
}

/// A 2D surface whose "pixels" are a trace of the commands drawn, salted
/// with a per-device rasterizer tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeCanvas {
    pub rasterizer: String,
    pub fault: Option<CanvasFault>,
}

impl FakeCanvas {
    pub fn new(rasterizer: &str) -> Self {
        Self {
            rasterizer: rasterizer.to_string(),
            fault: None,
        }
    }

    pub fn failing(fault: CanvasFault) -> Self {
        Self {
            rasterizer: String::new(),
            fault: Some(fault),
        }
    }
}

struct FakeSurface {
    trace: String,
    fault: Option<CanvasFault>,
}

impl CanvasProvider for FakeCanvas {
    fn create_2d(&self) -> Result<Box<dyn Canvas2d>> {
        if self.fault == Some(CanvasFault::CreateBlocked) {
            return Err(CapabilityError::Blocked("getContext('2d')".into()));
        }
        Ok(Box::new(FakeSurface {
            trace: self.rasterizer.clone(),
            fault: self.fault,
        }))
    }
}

#[async_trait(?Send)]
impl Canvas2d for FakeSurface {
    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        if self.fault == Some(CanvasFault::DrawFails) {
            return Err(CapabilityError::Failed("draw".into()));
        }
        self.trace.push_str(&format!(";{command:?}"));
        Ok(())
    }

    async fn to_data_url(&mut self) -> Result<String> {
        if self.fault == Some(CanvasFault::ReadbackBlocked) {
            return Err(CapabilityError::Blocked("toDataURL".into()));
        }
        Ok(format!("data:image/png;base64,{}", self.trace))
    }
}

/// Text metrics where generic families share one width and each installed
/// font has its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeFonts {
    pub generic_width: f64,
    pub installed: Vec<(String, f64)>,
    pub broken: bool,
}

impl FakeFonts {
    pub fn new(installed: &[(&str, f64)]) -> Self {
        Self {
            generic_width: 512.0,
            installed: installed
                .iter()
                .map(|(name, width)| (name.to_string(), *width))
                .collect(),
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            generic_width: 0.0,
            installed: vec![],
            broken: true,
        }
    }
}

impl FontMetrics for FakeFonts {
    fn measure_text(&self, font: &str, _text: &str) -> Result<f64> {
        if self.broken {
            return Err(CapabilityError::Blocked("measureText".into()));
        }
        // "72px Name, fallback": the leading family wins if installed.
        let families = font.split_once(' ').map(|(_, rest)| rest).unwrap_or(font);
        let leading = families.split(',').next().unwrap_or_default().trim();
        Ok(self
            .installed
            .iter()
            .find(|(name, _)| name == leading)
            .map(|(_, width)| *width)
            .unwrap_or(self.generic_width))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 3D context
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeGraphics {
    /// A working context. `unmasked` carries the debug-extension strings.
    Context {
        vendor: String,
        renderer: String,
        version: String,
        unmasked: Option<(String, String)>,
    },
    /// The host returns no context.
    NoContext,
    /// Requesting a context throws.
    Throws,
    /// The context exists but parameter queries fail.
    LostContext,
}

impl FakeGraphics {
    pub fn intel() -> Self {
        FakeGraphics::Context {
            vendor: "WebKit".into(),
            renderer: "WebKit WebGL".into(),
            version: "WebGL 1.0 (OpenGL ES 2.0 Chromium)".into(),
            unmasked: Some(("Intel Inc.".into(), "Intel Iris OpenGL Engine".into())),
        }
    }
}

struct FakeGl {
    graphics: FakeGraphics,
}

impl GraphicsProvider for FakeGraphics {
    fn context(&self) -> Result<Option<Box<dyn GlContext>>> {
        match self {
            FakeGraphics::NoContext => Ok(None),
            FakeGraphics::Throws => Err(CapabilityError::Blocked("getContext('webgl')".into())),
            other => Ok(Some(Box::new(FakeGl {
                graphics: other.clone(),
            }))),
        }
    }
}

impl GlContext for FakeGl {
    fn has_extension(&self, name: &str) -> bool {
        matches!(
            &self.graphics,
            FakeGraphics::Context { unmasked: Some(_), .. }
        ) && name == DEBUG_RENDERER_INFO
    }

    fn parameter(&self, param: GlParameter) -> Result<String> {
        let FakeGraphics::Context {
            vendor,
            renderer,
            version,
            unmasked,
        } = &self.graphics
        else {
            return Err(CapabilityError::Failed("context lost".into()));
        };
        let value = match (param, unmasked) {
            (GlParameter::Vendor, _) => vendor,
            (GlParameter::Renderer, _) => renderer,
            (GlParameter::Version, _) => version,
            (GlParameter::UnmaskedVendor, Some((v, _))) => v,
            (GlParameter::UnmaskedRenderer, Some((_, r))) => r,
            (_, None) => return Err(CapabilityError::Unsupported(format!("{param:?}"))),
        };
        Ok(value.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Audio
// ─────────────────────────────────────────────────────────────────────────────

/// What happened to the graphs a [`FakeAudio`] handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioLifecycle {
    pub opened: u32,
    pub started: u32,
    pub stopped: u32,
    pub closed: u32,
}

impl AudioLifecycle {
    /// Every opened graph was closed and every started oscillator stopped.
    pub fn all_released(&self) -> bool {
        self.opened == self.closed && self.started == self.stopped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFault {
    OpenFails,
    ConnectFails,
    SampleFails,
}

/// An audio subsystem returning a fixed analyser spectrum.
#[derive(Debug, Clone)]
pub struct FakeAudio {
    pub spectrum: Vec<u8>,
    pub fault: Option<AudioFault>,
    lifecycle: Rc<RefCell<AudioLifecycle>>,
}

impl FakeAudio {
    pub fn new(spectrum: Vec<u8>) -> Self {
        Self {
            spectrum,
            fault: None,
            lifecycle: Rc::new(RefCell::new(AudioLifecycle::default())),
        }
    }

    pub fn failing(fault: AudioFault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::new(vec![])
        }
    }

    /// Snapshot of the graph lifecycle counters, shared across clones.
    pub fn lifecycle(&self) -> AudioLifecycle {
        *self.lifecycle.borrow()
    }
}

struct FakeGraph {
    spectrum: Vec<u8>,
    fault: Option<AudioFault>,
    lifecycle: Rc<RefCell<AudioLifecycle>>,
}

impl AudioBackend for FakeAudio {
    fn open(&self) -> Result<Box<dyn AudioGraph>> {
        if self.fault == Some(AudioFault::OpenFails) {
            return Err(CapabilityError::Blocked("AudioContext".into()));
        }
        self.lifecycle.borrow_mut().opened += 1;
        Ok(Box::new(FakeGraph {
            spectrum: self.spectrum.clone(),
            fault: self.fault,
            lifecycle: Rc::clone(&self.lifecycle),
        }))
    }
}

#[async_trait(?Send)]
impl AudioGraph for FakeGraph {
    fn connect(&mut self, spec: &OscillatorSpec) -> Result<()> {
        if self.fault == Some(AudioFault::ConnectFails) {
            return Err(CapabilityError::Failed("connect".into()));
        }
        if spec.gain != 0.0 {
            return Err(CapabilityError::Failed("graph must be muted".into()));
        }
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.lifecycle.borrow_mut().started += 1;
        Ok(())
    }

    async fn frequency_data(&mut self) -> Result<Vec<u8>> {
        if self.fault == Some(AudioFault::SampleFails) {
            return Err(CapabilityError::Failed("getByteFrequencyData".into()));
        }
        Ok(self.spectrum.clone())
    }

    fn stop(&mut self) {
        self.lifecycle.borrow_mut().stopped += 1;
    }

    fn close(&mut self) {
        self.lifecycle.borrow_mut().closed += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment
// ─────────────────────────────────────────────────────────────────────────────

/// Clock choice for an environment.
#[derive(Debug, Clone)]
pub enum SimulatedClock {
    Fixed(FixedClock),
    Ticking(TickingClock),
}

/// One simulated device. `None` capabilities are absent from the host.
#[derive(Debug, Clone)]
pub struct SimulatedEnvironment {
    pub display: FakeDisplay,
    pub navigator: FakeNavigator,
    pub clock: SimulatedClock,
    pub canvas: Option<FakeCanvas>,
    pub graphics: Option<FakeGraphics>,
    pub audio: Option<FakeAudio>,
    pub fonts: Option<FakeFonts>,
}

impl SimulatedEnvironment {
    /// A desktop with every capability present and working.
    pub fn desktop() -> Self {
        Self {
            display: FakeDisplay::full_hd(),
            navigator: FakeNavigator::linux_chrome().with_plugins(&[
                ("PDF Viewer", "internal-pdf-viewer"),
                ("Chrome PDF Viewer", "internal-pdf-viewer"),
            ]),
            clock: SimulatedClock::Fixed(FixedClock::at(FIXED_NOW, -120)),
            canvas: Some(FakeCanvas::new("skia-intel")),
            graphics: Some(FakeGraphics::intel()),
            audio: Some(FakeAudio::new((0u8..=255).rev().collect())),
            fonts: Some(FakeFonts::new(&[("Arial", 530.0), ("Verdana", 601.5)])),
        }
    }

    /// A locked-down host: no canvas, 3D, audio, or font metrics, and an
    /// empty plugin registry.
    pub fn minimal() -> Self {
        Self {
            navigator: FakeNavigator::linux_chrome(),
            canvas: None,
            graphics: None,
            audio: None,
            fonts: None,
            ..Self::desktop()
        }
    }

    pub fn with_clock(mut self, clock: FixedClock) -> Self {
        self.clock = SimulatedClock::Fixed(clock);
        self
    }

    pub fn with_ticking_clock(mut self, start: i64, step: i64) -> Self {
        let offset = match &self.clock {
            SimulatedClock::Fixed(c) => c.offset_minutes,
            SimulatedClock::Ticking(c) => c.offset_minutes,
        };
        self.clock = SimulatedClock::Ticking(TickingClock::new(start, step, offset));
        self
    }

    /// Build the capability bundle. Fakes are cloned, so audio lifecycle
    /// counters stay shared with `self.audio`.
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = match &self.clock {
            SimulatedClock::Fixed(c) => {
                Capabilities::new(self.display, self.navigator.clone(), *c)
            }
            SimulatedClock::Ticking(c) => {
                Capabilities::new(self.display, self.navigator.clone(), c.clone())
            }
        };
        if let Some(canvas) = &self.canvas {
            caps = caps.with_canvas(canvas.clone());
        }
        if let Some(graphics) = &self.graphics {
            caps = caps.with_graphics(graphics.clone());
        }
        if let Some(audio) = &self.audio {
            caps = caps.with_audio(audio.clone());
        }
        if let Some(fonts) = &self.fonts {
            caps = caps.with_fonts(fonts.clone());
        }
        caps
    }
}
