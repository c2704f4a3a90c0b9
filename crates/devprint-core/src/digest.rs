//! Layered digests over subsets of a signal mapping.
//!
//! The composite identifier is a 32-bit fold of every signal. Servers that
//! want coarser or finer matching keys derive SHA-256 digests over fixed
//! layers instead:
//!
//! - **basic**: display, user agent, timezone, platform
//! - **advanced**: basic plus rendering and hardware fields
//! - **behavioral**: interaction patterns (never collected by the probes)
//! - **combined**: digest of the three hex digests joined by `|`
//!
//! Each layer hashes its fields' textual forms joined by `|`. A field the
//! mapping does not hold contributes an empty string, so positions never
//! shift.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::mapping::SignalMapping;
use crate::signal::Signal;

/// Separator between fields and between the digests folded into `combined`.
const LAYER_DELIMITER: &str = "|";

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Serialized as lowercase hex, the form servers store.
impl Serialize for Sha256Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// One position in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerField {
    /// A signal the probes collect.
    Collected(Signal),
    /// A field hosts may report but the probes never collect. Always empty.
    Uncollected(&'static str),
}

impl LayerField {
    fn text(self, mapping: &SignalMapping) -> String {
        match self {
            LayerField::Collected(signal) => mapping.text(signal),
            LayerField::Uncollected(_) => String::new(),
        }
    }
}

/// A named subset of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Basic,
    Advanced,
    Behavioral,
}

impl Layer {
    /// Fields in the layer, in hashing order.
    pub fn fields(self) -> &'static [LayerField] {
        use LayerField::{Collected, Uncollected};

        const BASIC: [LayerField; 4] = [
            Collected(Signal::ScreenResolution),
            Collected(Signal::UserAgentHash),
            Collected(Signal::TimezoneOffset),
            Collected(Signal::Platform),
        ];
        const ADVANCED: [LayerField; 10] = [
            Collected(Signal::ScreenResolution),
            Collected(Signal::UserAgentHash),
            Collected(Signal::TimezoneOffset),
            Collected(Signal::Platform),
            Collected(Signal::CanvasHash),
            Collected(Signal::WebglHash),
            Collected(Signal::HardwareConcurrency),
            Collected(Signal::Memory),
            Collected(Signal::ColorDepth),
            Uncollected("pixel_ratio"),
        ];
        const BEHAVIORAL: [LayerField; 4] = [
            Uncollected("mouse_movement_hash"),
            Uncollected("typing_rhythm_hash"),
            Uncollected("scroll_behavior_hash"),
            Uncollected("touch_pattern_hash"),
        ];
        match self {
            Layer::Basic => &BASIC,
            Layer::Advanced => &ADVANCED,
            Layer::Behavioral => &BEHAVIORAL,
        }
    }

    /// The `|`-joined text this layer hashes.
    pub fn preimage(self, mapping: &SignalMapping) -> String {
        self.fields()
            .iter()
            .map(|field| field.text(mapping))
            .collect::<Vec<_>>()
            .join(LAYER_DELIMITER)
    }

    /// Digest this layer of `mapping`.
    pub fn digest(self, mapping: &SignalMapping) -> Sha256Hash {
        Sha256Hash::hash(self.preimage(mapping).as_bytes())
    }
}

/// Digests for every layer of one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayeredDigests {
    pub basic: Sha256Hash,
    pub advanced: Sha256Hash,
    pub behavioral: Sha256Hash,
    pub combined: Sha256Hash,
}

/// Derive the basic, advanced, behavioral, and combined digests of a mapping.
pub fn layered_digests(mapping: &SignalMapping) -> LayeredDigests {
    let basic = Layer::Basic.digest(mapping);
    let advanced = Layer::Advanced.digest(mapping);
    let behavioral = Layer::Behavioral.digest(mapping);
    let combined = Sha256Hash::hash(
        [basic.to_hex(), advanced.to_hex(), behavioral.to_hex()]
            .join(LAYER_DELIMITER)
            .as_bytes(),
    );
    LayeredDigests {
        basic,
        advanced,
        behavioral,
        combined,
    }
}
