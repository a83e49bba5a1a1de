use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::AuditConfig;
use crate::issues::ScanWarning;

/// A plugin directory under `<root>/<pluginsDir>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub name: String,
    pub dir: PathBuf,
}

impl Plugin {
    /// Existing source directories (`src`, `bin`, ...) of this plugin.
    pub fn source_dirs(&self, config: &AuditConfig) -> Vec<PathBuf> {
        config
            .source_dirs
            .iter()
            .map(|d| self.dir.join(d))
            .filter(|d| d.is_dir())
            .collect()
    }

    pub fn lang_dir(&self, config: &AuditConfig) -> PathBuf {
        self.dir.join(&config.lang_dir)
    }
}

#[derive(Debug, Default)]
pub struct PluginDiscovery {
    pub plugins: Vec<Plugin>,
    pub warnings: Vec<ScanWarning>,
}

/// Lists plugins under `<root>/<pluginsDir>`, sorted by name.
///
/// When `only` is non-empty, plugins not named in it are skipped. A missing
/// plugins directory yields an empty discovery with a warning.
pub fn discover_plugins(root: &Path, config: &AuditConfig, only: &[String]) -> PluginDiscovery {
    let mut discovery = PluginDiscovery::default();
    let plugins_dir = root.join(&config.plugins_dir);

    if !plugins_dir.is_dir() {
        discovery
            .warnings
            .push(ScanWarning::missing_directory(&plugins_dir));
        return discovery;
    }

    let entries = match fs::read_dir(&plugins_dir) {
        Ok(entries) => entries,
        Err(e) => {
            discovery
                .warnings
                .push(ScanWarning::read_failed(&plugins_dir, e));
            return discovery;
        }
    };

    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if config.ignored_plugins.contains(&name) {
            continue;
        }
        if !only.is_empty() && !only.contains(&name) {
            continue;
        }
        discovery.plugins.push(Plugin { name, dir });
    }

    discovery.plugins.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(count = discovery.plugins.len(), "discovered plugins");
    discovery
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::WarningKind;
    use tempfile::tempdir;

    fn setup(names: &[&str]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for name in names {
            fs::create_dir_all(dir.path().join("plugins").join(name)).unwrap();
        }
        fs::write(dir.path().join("plugins/README.md"), "not a plugin").unwrap();
        dir
    }

    fn names(discovery: &PluginDiscovery) -> Vec<&str> {
        discovery.plugins.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_discover_sorted_and_skips_build() {
        let dir = setup(&["tpa", "build", "better-book"]);
        let discovery = discover_plugins(dir.path(), &AuditConfig::default(), &[]);
        assert_eq!(names(&discovery), vec!["better-book", "tpa"]);
        assert!(discovery.warnings.is_empty());
    }

    #[test]
    fn test_discover_with_filter() {
        let dir = setup(&["tpa", "guardian", "mcron"]);
        let only = vec!["mcron".to_string(), "unknown".to_string()];
        let discovery = discover_plugins(dir.path(), &AuditConfig::default(), &only);
        assert_eq!(names(&discovery), vec!["mcron"]);
    }

    #[test]
    fn test_missing_plugins_dir_is_a_warning() {
        let dir = tempdir().unwrap();
        let discovery = discover_plugins(dir.path(), &AuditConfig::default(), &[]);
        assert!(discovery.plugins.is_empty());
        assert_eq!(discovery.warnings.len(), 1);
        assert_eq!(discovery.warnings[0].kind, WarningKind::MissingDirectory);
    }

    #[test]
    fn test_source_dirs_only_existing() {
        let dir = setup(&["tpa"]);
        let plugin_dir = dir.path().join("plugins/tpa");
        fs::create_dir_all(plugin_dir.join("src")).unwrap();
        let plugin = Plugin {
            name: "tpa".to_string(),
            dir: plugin_dir.clone(),
        };
        assert_eq!(
            plugin.source_dirs(&AuditConfig::default()),
            vec![plugin_dir.join("src")]
        );
    }
}
