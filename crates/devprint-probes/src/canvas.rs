//! 2D rendering-surface probe.
//!
//! Draws a fixed scene offscreen, reads the pixel buffer back as a data
//! URL, and keeps the tail of its fold hash. Rasterization differs across
//! GPUs, drivers, and font stacks, which is the whole signal.

use std::f64::consts::PI;

use devprint_core::{hash_suffix, ProbeOutcome, Sentinel};
use tracing::debug;

use crate::capabilities::{CanvasProvider, DrawCommand};
use crate::error::Result;

/// The scene drawn by the probe, in order.
pub const SCENE: [DrawCommand; 11] = [
    DrawCommand::TextBaseline("top"),
    DrawCommand::Font("14px Arial"),
    DrawCommand::FillStyle("#f60"),
    DrawCommand::FillRect {
        x: 125.0,
        y: 1.0,
        w: 62.0,
        h: 20.0,
    },
    DrawCommand::FillStyle("#069"),
    DrawCommand::FillText {
        text: "Enhanced Device Fingerprint \u{1F512}",
        x: 2.0,
        y: 15.0,
    },
    DrawCommand::FillStyle("rgba(102, 204, 0, 0.2)"),
    DrawCommand::FillText {
        text: "Device Security Check",
        x: 4.0,
        y: 45.0,
    },
    DrawCommand::BeginPath,
    DrawCommand::Arc {
        x: 50.0,
        y: 50.0,
        radius: 20.0,
        start: 0.0,
        end: PI * 2.0,
    },
    DrawCommand::Fill,
];

/// Run the canvas probe.
///
/// Returns `canvas_unavailable` when the surface is missing or any step
/// fails.
pub async fn canvas_hash(canvas: Option<&dyn CanvasProvider>, suffix_len: usize) -> ProbeOutcome {
    let Some(provider) = canvas else {
        return Sentinel::CanvasUnavailable.into();
    };
    match render(provider).await {
        Ok(data_url) => ProbeOutcome::signal(hash_suffix(&data_url, suffix_len)),
        Err(e) => {
            debug!(error = %e, "canvas probe failed");
            Sentinel::CanvasUnavailable.into()
        }
    }
}

async fn render(provider: &dyn CanvasProvider) -> Result<String> {
    let mut surface = provider.create_2d()?;
    for command in &SCENE {
        surface.draw(command)?;
    }
    surface.to_data_url().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Canvas2d;
    use crate::error::CapabilityError;
    use async_trait::async_trait;
    use devprint_core::fold_hash;

    /// Records the scene and encodes it as its command count.
    struct CountingSurface {
        drawn: usize,
        block_readback: bool,
    }

    #[async_trait(?Send)]
    impl Canvas2d for CountingSurface {
        fn draw(&mut self, _command: &DrawCommand) -> Result<()> {
            self.drawn += 1;
            Ok(())
        }

        async fn to_data_url(&mut self) -> Result<String> {
            if self.block_readback {
                return Err(CapabilityError::Blocked("readback".into()));
            }
            Ok(format!("data:image/png;base64,{}", self.drawn))
        }
    }

    struct Provider {
        block_readback: bool,
    }

    impl CanvasProvider for Provider {
        fn create_2d(&self) -> Result<Box<dyn Canvas2d>> {
            Ok(Box::new(CountingSurface {
                drawn: 0,
                block_readback: self.block_readback,
            }))
        }
    }

    #[tokio::test]
    async fn test_hashes_readback() {
        let provider = Provider {
            block_readback: false,
        };
        let outcome = canvas_hash(Some(&provider), 16).await;
        let expected = fold_hash("data:image/png;base64,11").to_string();
        assert_eq!(outcome.to_text(), expected);
    }

    #[tokio::test]
    async fn test_absent_surface() {
        let outcome = canvas_hash(None, 16).await;
        assert_eq!(outcome.sentinel(), Some(Sentinel::CanvasUnavailable));
    }

    #[tokio::test]
    async fn test_blocked_readback() {
        let provider = Provider {
            block_readback: true,
        };
        let outcome = canvas_hash(Some(&provider), 16).await;
        assert_eq!(outcome.sentinel(), Some(Sentinel::CanvasUnavailable));
    }
}
