//! Display metrics probes. These always succeed.

use devprint_core::ProbeOutcome;

use crate::capabilities::DisplayMetrics;

/// `{width}x{height}x{color_depth}`.
pub fn screen_resolution(display: &dyn DisplayMetrics) -> ProbeOutcome {
    let s = display.screen();
    ProbeOutcome::signal(format!("{}x{}x{}", s.width, s.height, s.color_depth))
}

pub fn color_depth(display: &dyn DisplayMetrics) -> ProbeOutcome {
    ProbeOutcome::signal(display.screen().color_depth)
}

pub fn pixel_depth(display: &dyn DisplayMetrics) -> ProbeOutcome {
    ProbeOutcome::signal(display.screen().pixel_depth)
}

/// `{avail_width}x{avail_height}`.
pub fn available_resolution(display: &dyn DisplayMetrics) -> ProbeOutcome {
    let s = display.screen();
    ProbeOutcome::signal(format!("{}x{}", s.avail_width, s.avail_height))
}
