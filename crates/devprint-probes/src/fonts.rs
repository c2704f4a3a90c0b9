//! Font-availability probe.
//!
//! A candidate font counts as installed when the test string, set in the
//! candidate layered over any generic family, measures differently from the
//! first generic family set alone. A missing candidate falls through to the
//! generic family, so on hosts whose generic families differ in width the
//! later families can report a font that is not installed.

use devprint_core::{hash_suffix, ProbeOutcome, Sentinel};
use tracing::debug;

use crate::capabilities::FontMetrics;
use crate::config::ProbeConfig;
use crate::error::Result;

/// Run the font probe: detected names joined by `|`, hashed.
pub fn fonts_hash(fonts: Option<&dyn FontMetrics>, config: &ProbeConfig) -> ProbeOutcome {
    let Some(metrics) = fonts else {
        return Sentinel::FontsError.into();
    };
    match detect_fonts(metrics, config) {
        Ok(found) => {
            debug!(count = found.len(), "fonts detected");
            ProbeOutcome::signal(hash_suffix(&found.join("|"), config.hash_suffix_len))
        }
        Err(e) => {
            debug!(error = %e, "font measurement failed");
            Sentinel::FontsError.into()
        }
    }
}

/// Candidates from `config` that are installed, in candidate order.
///
/// The first baseline family is measured alone once. Every layered width,
/// over every baseline, is compared against that single reference.
pub fn detect_fonts(metrics: &dyn FontMetrics, config: &ProbeConfig) -> Result<Vec<String>> {
    let Some(reference) = config.font_baselines.first() else {
        return Ok(Vec::new());
    };
    let reference = format!("{} {}", config.font_size, reference);
    let reference_width = metrics.measure_text(&reference, &config.font_test_string)?;

    let mut found = Vec::new();
    for candidate in &config.font_candidates {
        if is_installed(metrics, config, candidate, reference_width)? {
            found.push(candidate.clone());
        }
    }
    Ok(found)
}

fn is_installed(
    metrics: &dyn FontMetrics,
    config: &ProbeConfig,
    candidate: &str,
    reference_width: f64,
) -> Result<bool> {
    for base in &config.font_baselines {
        let font = format!("{} {}, {}", config.font_size, candidate, base);
        if metrics.measure_text(&font, &config.font_test_string)? != reference_width {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;

    /// Generic families measure 100.0; an installed font measures 120.0
    /// wherever it leads the font list.
    struct Metrics {
        installed: &'static [&'static str],
        broken: bool,
    }

    impl FontMetrics for Metrics {
        fn measure_text(&self, font: &str, _text: &str) -> Result<f64> {
            if self.broken {
                return Err(CapabilityError::Blocked("measureText".into()));
            }
            let family = font.trim_start_matches("72px ");
            let leading = family.split(',').next().unwrap_or_default().trim();
            if self.installed.iter().any(|f| *f == leading) {
                Ok(120.0)
            } else {
                Ok(100.0)
            }
        }
    }

    fn config(candidates: &[&str]) -> ProbeConfig {
        ProbeConfig {
            font_candidates: candidates.iter().map(|c| c.to_string()).collect(),
            ..ProbeConfig::default()
        }
    }

    #[test]
    fn test_detects_injected_font_only() {
        let metrics = Metrics {
            installed: &["Inter"],
            broken: false,
        };
        let found = detect_fonts(&metrics, &config(&["Arial", "Inter", "Georgia"])).unwrap();
        assert_eq!(found, vec!["Inter"]);
    }

    #[test]
    fn test_hash_of_detected_set() {
        let metrics = Metrics {
            installed: &["Arial", "Georgia"],
            broken: false,
        };
        let outcome = fonts_hash(Some(&metrics), &config(&["Arial", "Inter", "Georgia"]));
        let expected = devprint_core::fold_hash("Arial|Georgia").to_string();
        assert_eq!(outcome.to_text(), expected);
    }

    #[test]
    fn test_none_installed_hashes_empty_set() {
        let metrics = Metrics {
            installed: &[],
            broken: false,
        };
        let outcome = fonts_hash(Some(&metrics), &ProbeConfig::default());
        assert_eq!(outcome.to_text(), "0");
    }

    /// Generic families of differing widths, nothing installed.
    struct UnevenGenerics;

    impl FontMetrics for UnevenGenerics {
        fn measure_text(&self, font: &str, _text: &str) -> Result<f64> {
            let family = font.trim_start_matches("72px ");
            let fallback = family.rsplit(',').next().unwrap_or_default().trim();
            Ok(match fallback {
                "monospace" => 500.0,
                "sans-serif" => 520.0,
                "serif" => 510.0,
                other => panic!("unexpected family {other}"),
            })
        }
    }

    #[test]
    fn test_compares_against_first_baseline_only() {
        let found = detect_fonts(&UnevenGenerics, &config(&["Arial"])).unwrap();
        assert_eq!(found, vec!["Arial"]);

        let mono_only = ProbeConfig {
            font_baselines: vec!["monospace".to_string()],
            ..config(&["Arial"])
        };
        assert!(detect_fonts(&UnevenGenerics, &mono_only).unwrap().is_empty());
    }

    #[test]
    fn test_measurement_failure() {
        let metrics = Metrics {
            installed: &[],
            broken: true,
        };
        let outcome = fonts_hash(Some(&metrics), &ProbeConfig::default());
        assert_eq!(outcome.sentinel(), Some(Sentinel::FontsError));
        assert_eq!(
            fonts_hash(None, &ProbeConfig::default()).sentinel(),
            Some(Sentinel::FontsError)
        );
    }
}
