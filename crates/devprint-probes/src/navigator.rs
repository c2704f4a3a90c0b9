//! Navigator and locale probes.
//!
//! Each absent property has a fixed default (empty string, `0`) instead of
//! a sentinel. The user agent is the only field compressed before it enters
//! the mapping; the others are stored raw.

use devprint_core::{fold_hash, ProbeOutcome};

use crate::capabilities::{Clock, Navigator};

/// Fold hash of the user agent, as decimal text.
pub fn user_agent_hash(navigator: &dyn Navigator) -> ProbeOutcome {
    ProbeOutcome::signal(fold_hash(&navigator.user_agent()).to_string())
}

pub fn timezone_offset(clock: &dyn Clock) -> ProbeOutcome {
    ProbeOutcome::signal(i64::from(clock.timezone_offset_minutes()))
}

pub fn language(navigator: &dyn Navigator) -> ProbeOutcome {
    ProbeOutcome::signal(navigator.language().unwrap_or_default())
}

pub fn platform(navigator: &dyn Navigator) -> ProbeOutcome {
    ProbeOutcome::signal(navigator.platform().unwrap_or_default())
}

pub fn hardware_concurrency(navigator: &dyn Navigator) -> ProbeOutcome {
    ProbeOutcome::signal(navigator.hardware_concurrency().unwrap_or(0))
}

pub fn memory(navigator: &dyn Navigator) -> ProbeOutcome {
    ProbeOutcome::signal(navigator.device_memory().unwrap_or(0.0))
}

/// Touch events exposed, or at least one touch point.
pub fn touch_support(navigator: &dyn Navigator) -> ProbeOutcome {
    let points = navigator.max_touch_points().unwrap_or(0);
    ProbeOutcome::signal(navigator.touch_events_supported() || points > 0)
}
