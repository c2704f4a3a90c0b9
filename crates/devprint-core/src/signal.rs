//! Signal names, values, sentinels, and probe outcomes.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Largest magnitude at which every whole `f64` is exact (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A pre-declared signal name.
///
/// Variant order is the declared order: probes run in this order and the
/// composite is serialized in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    ScreenResolution,
    UserAgentHash,
    TimezoneOffset,
    Language,
    Platform,
    HardwareConcurrency,
    Memory,
    ColorDepth,
    PixelDepth,
    AvailableResolution,
    TouchSupport,
    CanvasHash,
    WebglHash,
    AudioHash,
    FontsHash,
    PluginsHash,
    Timestamp,
}

impl Signal {
    /// Every signal, in declared order.
    pub const ALL: [Signal; 17] = [
        Signal::ScreenResolution,
        Signal::UserAgentHash,
        Signal::TimezoneOffset,
        Signal::Language,
        Signal::Platform,
        Signal::HardwareConcurrency,
        Signal::Memory,
        Signal::ColorDepth,
        Signal::PixelDepth,
        Signal::AvailableResolution,
        Signal::TouchSupport,
        Signal::CanvasHash,
        Signal::WebglHash,
        Signal::AudioHash,
        Signal::FontsHash,
        Signal::PluginsHash,
        Signal::Timestamp,
    ];

    /// Position in the declared order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name of the signal.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Signal::ScreenResolution => "screen_resolution",
            Signal::UserAgentHash => "user_agent_hash",
            Signal::TimezoneOffset => "timezone_offset",
            Signal::Language => "language",
            Signal::Platform => "platform",
            Signal::HardwareConcurrency => "hardware_concurrency",
            Signal::Memory => "memory",
            Signal::ColorDepth => "color_depth",
            Signal::PixelDepth => "pixel_depth",
            Signal::AvailableResolution => "available_resolution",
            Signal::TouchSupport => "touch_support",
            Signal::CanvasHash => "canvas_hash",
            Signal::WebglHash => "webgl_hash",
            Signal::AudioHash => "audio_hash",
            Signal::FontsHash => "fonts_hash",
            Signal::PluginsHash => "plugins_hash",
            Signal::Timestamp => "timestamp",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A genuine observation produced by a probe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
}

impl SignalValue {
    /// Stable textual form used for hashing.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalValue::Text(s) => f.write_str(s),
            SignalValue::Integer(n) => write!(f, "{n}"),
            SignalValue::Number(x) if x.is_nan() => f.write_str("NaN"),
            SignalValue::Number(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            SignalValue::Number(x) if *x == 0.0 => f.write_str("0"),
            // Shortest round-trip form: 8.0 renders as "8", 0.5 as "0.5".
            SignalValue::Number(x) => write!(f, "{x}"),
            SignalValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Whole-valued numbers serialize as JSON integers (`8`, not `8.0`), the
/// same form as their hashed text.
impl Serialize for SignalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SignalValue::Text(s) => serializer.serialize_str(s),
            SignalValue::Integer(n) => serializer.serialize_i64(*n),
            SignalValue::Number(x) if x.fract() == 0.0 && x.abs() <= MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*x as i64)
            }
            SignalValue::Number(x) => serializer.serialize_f64(*x),
            SignalValue::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<String> for SignalValue {
    fn from(s: String) -> Self {
        SignalValue::Text(s)
    }
}

impl From<&str> for SignalValue {
    fn from(s: &str) -> Self {
        SignalValue::Text(s.to_string())
    }
}

impl From<i64> for SignalValue {
    fn from(n: i64) -> Self {
        SignalValue::Integer(n)
    }
}

impl From<u32> for SignalValue {
    fn from(n: u32) -> Self {
        SignalValue::Integer(i64::from(n))
    }
}

impl From<f64> for SignalValue {
    fn from(x: f64) -> Self {
        SignalValue::Number(x)
    }
}

impl From<bool> for SignalValue {
    fn from(b: bool) -> Self {
        SignalValue::Flag(b)
    }
}

/// Fixed failure marker substituted for a signal when extraction fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentinel {
    CanvasUnavailable,
    WebglUnavailable,
    WebglError,
    AudioUnavailable,
    AudioError,
    FontsError,
    PluginsError,
}

impl Sentinel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sentinel::CanvasUnavailable => "canvas_unavailable",
            Sentinel::WebglUnavailable => "webgl_unavailable",
            Sentinel::WebglError => "webgl_error",
            Sentinel::AudioUnavailable => "audio_unavailable",
            Sentinel::AudioError => "audio_error",
            Sentinel::FontsError => "fonts_error",
            Sentinel::PluginsError => "plugins_error",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of running one probe.
///
/// Probes never return errors: a fault becomes [`ProbeOutcome::Failed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProbeOutcome {
    Signal(SignalValue),
    Failed(Sentinel),
}

impl ProbeOutcome {
    /// Shorthand for a signal outcome.
    pub fn signal(value: impl Into<SignalValue>) -> Self {
        ProbeOutcome::Signal(value.into())
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, ProbeOutcome::Signal(_))
    }

    /// The sentinel, if this outcome is a failure.
    pub fn sentinel(&self) -> Option<Sentinel> {
        match self {
            ProbeOutcome::Failed(s) => Some(*s),
            ProbeOutcome::Signal(_) => None,
        }
    }

    pub fn value(&self) -> Option<&SignalValue> {
        match self {
            ProbeOutcome::Signal(v) => Some(v),
            ProbeOutcome::Failed(_) => None,
        }
    }

    /// Stable textual form used for hashing.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Signal(v) => fmt::Display::fmt(v, f),
            ProbeOutcome::Failed(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl From<Sentinel> for ProbeOutcome {
    fn from(s: Sentinel) -> Self {
        ProbeOutcome::Failed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_order_matches_index() {
        for (i, signal) in Signal::ALL.iter().enumerate() {
            assert_eq!(signal.index(), i);
        }
        assert_eq!(Signal::ALL.last(), Some(&Signal::Timestamp));
    }

    #[test]
    fn test_name_roundtrip() {
        for signal in Signal::ALL {
            assert_eq!(Signal::from_name(signal.as_str()), Some(signal));
        }
        assert_eq!(Signal::from_name("battery_level"), None);
    }

    #[test]
    fn test_serde_names_match_wire_names() {
        for signal in Signal::ALL {
            let json = serde_json::to_string(&signal).unwrap();
            assert_eq!(json, format!("\"{}\"", signal.as_str()));
        }
        let json = serde_json::to_string(&Sentinel::WebglError).unwrap();
        assert_eq!(json, "\"webgl_error\"");
    }

    #[test]
    fn test_value_text_forms() {
        assert_eq!(SignalValue::from(true).to_text(), "true");
        assert_eq!(SignalValue::from(false).to_text(), "false");
        assert_eq!(SignalValue::from(8.0).to_text(), "8");
        assert_eq!(SignalValue::from(0.5).to_text(), "0.5");
        assert_eq!(SignalValue::from(-300i64).to_text(), "-300");
        assert_eq!(SignalValue::from(f64::NAN).to_text(), "NaN");
        assert_eq!(SignalValue::from(-0.0).to_text(), "0");
        assert_eq!(SignalValue::from("en-US").to_text(), "en-US");
    }

    #[test]
    fn test_outcome_text_and_json() {
        let failed = ProbeOutcome::from(Sentinel::AudioUnavailable);
        assert_eq!(failed.to_text(), "audio_unavailable");
        assert_eq!(failed.sentinel(), Some(Sentinel::AudioUnavailable));
        assert!(!failed.is_signal());

        let ok = ProbeOutcome::signal(24u32);
        assert!(ok.is_signal());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "24");
        assert_eq!(serde_json::to_string(&failed).unwrap(), "\"audio_unavailable\"");
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        let json = |v: f64| serde_json::to_string(&SignalValue::from(v)).unwrap();
        assert_eq!(json(8.0), "8");
        assert_eq!(json(-0.0), "0");
        assert_eq!(json(0.5), "0.5");
        assert_eq!(json(f64::NAN), "null");
        assert_eq!(json(1e300), "1e300");
        assert_eq!(json(8.0), SignalValue::from(8.0).to_text());
    }
}
