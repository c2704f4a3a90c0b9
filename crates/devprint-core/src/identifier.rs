//! The composite identifier.

use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Prefix of the fallback identifier's textual form.
const FALLBACK_PREFIX: &str = "fallback_";

/// Composite identifier derived from a signal mapping.
///
/// Not unique: devices with identical configurations share a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Fold hash of the serialized mapping.
    Hash(u32),
    /// Aggregation failed; tagged with the generation time in Unix ms.
    ///
    /// `generated_at` is 0 only when no clock could be read at all.
    Fallback { generated_at: i64 },
}

impl Identifier {
    /// Build the fallback identifier for a generation time.
    pub const fn fallback(generated_at: i64) -> Self {
        Identifier::Fallback { generated_at }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Identifier::Fallback { .. })
    }

    /// The numeric value, unless this is a fallback.
    pub fn as_hash(&self) -> Option<u32> {
        match self {
            Identifier::Hash(h) => Some(*h),
            Identifier::Fallback { .. } => None,
        }
    }

    /// Parse the textual form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(ts) = s.strip_prefix(FALLBACK_PREFIX) {
            return ts.parse().ok().map(Identifier::fallback);
        }
        s.parse().ok().map(Identifier::Hash)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Hash(h) => write!(f, "{h}"),
            Identifier::Fallback { generated_at } => write!(f, "{FALLBACK_PREFIX}{generated_at}"),
        }
    }
}

/// Numeric identifiers serialize as numbers, fallbacks as strings.
impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Identifier::Hash(h) => serializer.serialize_u32(*h),
            Identifier::Fallback { .. } => serializer.collect_str(self),
        }
    }
}
