//! The fold hash: a deterministic, non-cryptographic string-to-integer fold.
//!
//! Every signal that is compressed, and the final composite, goes through
//! [`fold_hash`]. The fold walks UTF-16 code units with a 32-bit signed
//! accumulator:
//!
//! ```text
//! acc = 0
//! for each code unit c:  acc = (acc << 5) - acc + c   (wrapping i32)
//! result = |acc|
//! ```
//!
//! The absolute value is taken as unsigned, so an accumulator of
//! `i32::MIN` yields `2147483648` rather than overflowing.

/// Number of trailing decimal characters kept by per-probe hashes.
pub const SUFFIX_LEN: usize = 16;

/// Fold a string into a non-negative 32-bit value.
///
/// Empty input yields 0.
pub fn fold_hash(input: &str) -> u32 {
    let mut acc: i32 = 0;
    for unit in input.encode_utf16() {
        acc = acc
            .wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit));
    }
    acc.unsigned_abs()
}

/// Hash `input` and keep only the last `len` characters of its decimal form.
pub fn hash_suffix(input: &str, len: usize) -> String {
    let digits = fold_hash(input).to_string();
    // Decimal digits are ASCII, so byte offsets are char offsets.
    let start = digits.len().saturating_sub(len);
    digits[start..].to_string()
}
