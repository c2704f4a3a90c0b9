//! The ordered signal mapping.
//!
//! Keys are the fixed [`Signal`] catalogue. Entries must be recorded in
//! declared order, so insertion order and serialization order are the same
//! thing. The composite is built from values only; names never enter the
//! hashed string.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{CoreError, Result};
use crate::hash::fold_hash;
use crate::signal::{ProbeOutcome, Signal};

/// Delimiter placed between values in the serialized composite.
pub const DEFAULT_DELIMITER: char = '|';

/// Ordered mapping from signal name to probe outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalMapping {
    entries: Vec<(Signal, ProbeOutcome)>,
}

impl SignalMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(Signal::ALL.len()),
        }
    }

    /// Record the outcome for `signal`.
    ///
    /// Rejects a signal that was already recorded, or one that precedes the
    /// last recorded signal in declared order.
    pub fn record(&mut self, signal: Signal, outcome: ProbeOutcome) -> Result<()> {
        if let Some((last, _)) = self.entries.last() {
            if signal == *last || self.get(signal).is_some() {
                return Err(CoreError::DuplicateSignal(signal));
            }
            if signal < *last {
                return Err(CoreError::OutOfOrder {
                    signal,
                    after: *last,
                });
            }
        }
        self.entries.push((signal, outcome));
        Ok(())
    }

    /// Look up the outcome for a signal.
    pub fn get(&self, signal: Signal) -> Option<&ProbeOutcome> {
        self.entries
            .iter()
            .find(|(s, _)| *s == signal)
            .map(|(_, outcome)| outcome)
    }

    /// Textual form of a signal's outcome, or the empty string when absent.
    pub fn text(&self, signal: Signal) -> String {
        self.get(signal).map(ProbeOutcome::to_text).unwrap_or_default()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Signal, &ProbeOutcome)> {
        self.entries.iter().map(|(s, o)| (*s, o))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signals from the catalogue that have not been recorded.
    pub fn missing(&self) -> Vec<Signal> {
        Signal::ALL
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }

    /// True when every declared signal has an outcome.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == Signal::ALL.len()
    }

    /// Signals whose outcome is a sentinel.
    pub fn failed_signals(&self) -> Vec<Signal> {
        self.entries
            .iter()
            .filter(|(_, o)| !o.is_signal())
            .map(|(s, _)| *s)
            .collect()
    }

    /// Join every value in declared order with `delimiter`.
    ///
    /// The mapping must be complete.
    pub fn serialize_values(&self, delimiter: char) -> Result<String> {
        self.serialize_values_excluding(delimiter, &[])
    }

    /// Join values in declared order, skipping `excluded` signals.
    ///
    /// Every signal not in `excluded` must be present.
    pub fn serialize_values_excluding(
        &self,
        delimiter: char,
        excluded: &[Signal],
    ) -> Result<String> {
        let missing: Vec<Signal> = self
            .missing()
            .into_iter()
            .filter(|s| !excluded.contains(s))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::IncompleteMapping { missing });
        }

        let mut buf = String::new();
        let mut first = true;
        for (signal, outcome) in self.iter() {
            if excluded.contains(&signal) {
                continue;
            }
            if !first {
                buf.push(delimiter);
            }
            buf.push_str(&outcome.to_text());
            first = false;
        }
        Ok(buf)
    }

    /// Fold the serialized composite into an integer.
    pub fn composite_hash(&self, delimiter: char) -> Result<u32> {
        Ok(fold_hash(&self.serialize_values(delimiter)?))
    }

    /// Composite hash with the timestamp left out.
    ///
    /// Two mappings taken from the same environment agree on this value even
    /// when they were generated at different instants.
    pub fn stable_hash(&self, delimiter: char) -> Result<u32> {
        let serialized = self.serialize_values_excluding(delimiter, &[Signal::Timestamp])?;
        Ok(fold_hash(&serialized))
    }
}

impl Serialize for SignalMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (signal, outcome) in &self.entries {
            map.serialize_entry(signal.as_str(), outcome)?;
        }
        map.end()
    }
}
