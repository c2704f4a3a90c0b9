//! 3D context probe.

use devprint_core::{hash_suffix, ProbeOutcome, Sentinel};
use tracing::debug;

use crate::capabilities::{GlContext, GlParameter, GraphicsProvider, DEBUG_RENDERER_INFO};
use crate::error::Result;

/// Run the 3D context probe.
///
/// `webgl_unavailable` when no context can be obtained, `webgl_error` for
/// any other fault.
pub fn webgl_hash(graphics: Option<&dyn GraphicsProvider>, suffix_len: usize) -> ProbeOutcome {
    let Some(provider) = graphics else {
        return Sentinel::WebglUnavailable.into();
    };
    let context = match provider.context() {
        Ok(Some(context)) => context,
        Ok(None) => return Sentinel::WebglUnavailable.into(),
        Err(e) => {
            debug!(error = %e, "3d context request failed");
            return Sentinel::WebglError.into();
        }
    };
    match describe(context.as_ref()) {
        Ok(info) => ProbeOutcome::signal(hash_suffix(&info, suffix_len)),
        Err(e) => {
            debug!(error = %e, "3d context query failed");
            Sentinel::WebglError.into()
        }
    }
}

/// `vendor|renderer|version`, preferring the unmasked strings.
fn describe(gl: &dyn GlContext) -> Result<String> {
    let (vendor, renderer) = if gl.has_extension(DEBUG_RENDERER_INFO) {
        (GlParameter::UnmaskedVendor, GlParameter::UnmaskedRenderer)
    } else {
        (GlParameter::Vendor, GlParameter::Renderer)
    };
    Ok(format!(
        "{}|{}|{}",
        gl.parameter(vendor)?,
        gl.parameter(renderer)?,
        gl.parameter(GlParameter::Version)?
    ))
}
