//! Plugin-enumeration probe.

use devprint_core::{hash_suffix, ProbeOutcome, Sentinel};
use tracing::debug;

use crate::capabilities::Navigator;

/// `name|version` per plugin, joined by `|`, hashed.
///
/// An inaccessible or empty registry yields `plugins_error`.
pub fn plugins_hash(navigator: &dyn Navigator, suffix_len: usize) -> ProbeOutcome {
    let plugins = match navigator.plugins() {
        Ok(plugins) if !plugins.is_empty() => plugins,
        Ok(_) => return Sentinel::PluginsError.into(),
        Err(e) => {
            debug!(error = %e, "plugin registry inaccessible");
            return Sentinel::PluginsError.into();
        }
    };
    let joined = plugins
        .iter()
        .map(|p| format!("{}|{}", p.name, p.version))
        .collect::<Vec<_>>()
        .join("|");
    ProbeOutcome::signal(hash_suffix(&joined, suffix_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::PluginInfo;
    use crate::error::{CapabilityError, Result};

    struct Registry(Result<Vec<PluginInfo>>);

    impl Navigator for Registry {
        fn user_agent(&self) -> String {
            String::new()
        }
        fn language(&self) -> Option<String> {
            None
        }
        fn platform(&self) -> Option<String> {
            None
        }
        fn hardware_concurrency(&self) -> Option<u32> {
            None
        }
        fn device_memory(&self) -> Option<f64> {
            None
        }
        fn touch_events_supported(&self) -> bool {
            false
        }
        fn max_touch_points(&self) -> Option<u32> {
            None
        }
        fn plugins(&self) -> Result<Vec<PluginInfo>> {
            self.0.clone()
        }
    }

    fn plugin(name: &str, version: &str) -> PluginInfo {
        PluginInfo {
            name: name.into(),
            version: version.into(),
        }
    }

    #[test]
    fn test_joins_name_version_pairs() {
        let registry = Registry(Ok(vec![
            plugin("PDF Viewer", ""),
            plugin("Chrome PDF Viewer", "1.0"),
        ]));
        let expected = devprint_core::fold_hash("PDF Viewer||Chrome PDF Viewer|1.0").to_string();
        assert_eq!(plugins_hash(&registry, 16).to_text(), expected);
    }

    #[test]
    fn test_empty_and_inaccessible_registries() {
        let empty = Registry(Ok(vec![]));
        assert_eq!(plugins_hash(&empty, 16).sentinel(), Some(Sentinel::PluginsError));

        let denied = Registry(Err(CapabilityError::Blocked("plugins".into())));
        assert_eq!(plugins_hash(&denied, 16).sentinel(), Some(Sentinel::PluginsError));
    }
}
