//! Golden test vectors for deterministic verification.
//!
//! These pin the fold hash and the composite identifier so that every
//! host binding produces identical identifiers for identical signals.

use devprint_core::fold_hash;

use crate::fixtures::FIXED_NOW;

/// A fold hash input and its expected value.
#[derive(Debug, Clone, Copy)]
pub struct HashVector {
    pub name: &'static str,
    pub input: &'static str,
    pub expected: u32,
}

/// Get all fold hash vectors.
pub fn hash_vectors() -> Vec<HashVector> {
    vec![
        HashVector {
            name: "empty string",
            input: "",
            expected: 0,
        },
        HashVector {
            name: "single code unit",
            input: "a",
            expected: 97,
        },
        HashVector {
            name: "two code units",
            input: "ab",
            expected: 3105,
        },
        HashVector {
            name: "abc",
            input: "abc",
            expected: 96354,
        },
        HashVector {
            name: "hello",
            input: "hello",
            expected: 99_162_322,
        },
        HashVector {
            name: "accumulator lands on i32::MIN",
            input: "polygenelubricants",
            expected: 2_147_483_648,
        },
        HashVector {
            name: "surrogate pair",
            input: "\u{1F512}",
            expected: 1_772_661,
        },
        HashVector {
            name: "desktop user agent",
            input: MINIMAL_USER_AGENT,
            expected: 72_168_558,
        },
    ]
}

/// Verify all hash vectors. Returns the names of failing vectors.
pub fn verify_hash_vectors() -> Vec<&'static str> {
    hash_vectors()
        .into_iter()
        .filter(|v| fold_hash(v.input) != v.expected)
        .map(|v| v.name)
        .collect()
}

/// User agent reported by [`SimulatedEnvironment::minimal`](crate::SimulatedEnvironment::minimal).
pub const MINIMAL_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                      (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A full run on a known environment.
#[derive(Debug, Clone, Copy)]
pub struct CompositeVector {
    pub name: &'static str,
    /// Values joined with `|`, in signal order.
    pub serialized: &'static str,
    /// Fold hash of `serialized`.
    pub composite: u32,
    /// Fold hash with the timestamp left out.
    pub stable: u32,
    pub timestamp: i64,
}

/// The run produced by [`SimulatedEnvironment::minimal`](crate::SimulatedEnvironment::minimal).
pub const MINIMAL_ENVIRONMENT: CompositeVector = CompositeVector {
    name: "locked-down desktop",
    serialized: "1920x1080x24|72168558|-120|en-US|Linux x86_64|8|8|24|24|1920x1040|false|\
                 canvas_unavailable|webgl_unavailable|audio_unavailable|fonts_error|\
                 plugins_error|1736870400000",
    composite: 102_347_358,
    stable: 747_506_698,
    timestamp: FIXED_NOW,
};
