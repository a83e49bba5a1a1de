//! Key audit: template keys used in plugin sources versus keys defined in
//! their YAML translation files.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::{
    markers::{extract_keys, remove_placeholders},
    plugins::{Plugin, discover_plugins},
    scanner::scan_sources,
    translations::{list_translation_files, load_translation_keys},
};
use crate::config::AuditConfig;
use crate::issues::ScanWarning;

/// File name reported for a plugin that uses keys but has no lang directory.
pub const NO_TRANSLATION_FILE: &str = "(no translation file)";

/// Used/defined/missing/redundant keys for one (plugin, translation file) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub plugin: String,
    /// Translation file name, or [`NO_TRANSLATION_FILE`].
    pub file: String,
    /// Full path of the translation file, `None` for the sentinel.
    pub path: Option<PathBuf>,
    pub used: BTreeSet<String>,
    pub defined: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub redundant: BTreeSet<String>,
}

impl AnalysisResult {
    pub fn new(
        plugin: impl Into<String>,
        file: impl Into<String>,
        path: Option<PathBuf>,
        used: BTreeSet<String>,
        defined: BTreeSet<String>,
    ) -> Self {
        let missing = used.difference(&defined).cloned().collect();
        let redundant = defined.difference(&used).cloned().collect();
        Self {
            plugin: plugin.into(),
            file: file.into(),
            path,
            used,
            defined,
            missing,
            redundant,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.redundant.is_empty()
    }
}

/// Everything one audit run produced.
#[derive(Debug, Default)]
pub struct AuditOutcome {
    pub results: Vec<AnalysisResult>,
    pub warnings: Vec<ScanWarning>,
    pub plugins_scanned: usize,
    pub source_files_scanned: usize,
}

impl AuditOutcome {
    pub fn total_missing(&self) -> usize {
        self.results.iter().map(|r| r.missing.len()).sum()
    }

    pub fn total_redundant(&self) -> usize {
        self.results.iter().map(|r| r.redundant.len()).sum()
    }
}

pub struct KeyAuditor<'a> {
    config: &'a AuditConfig,
}

impl<'a> KeyAuditor<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// Audits every plugin under `root` (or only those named in `only`).
    pub fn audit(&self, root: &Path, only: &[String]) -> AuditOutcome {
        let discovery = discover_plugins(root, self.config, only);
        let mut outcome = AuditOutcome {
            warnings: discovery.warnings,
            ..Default::default()
        };

        for plugin in &discovery.plugins {
            self.audit_plugin(plugin, &mut outcome);
            outcome.plugins_scanned += 1;
        }

        outcome
    }

    fn audit_plugin(&self, plugin: &Plugin, outcome: &mut AuditOutcome) {
        let used = self.used_keys(plugin, outcome);
        debug!(plugin = %plugin.name, used = used.len(), "collected used keys");

        let lang_dir = plugin.lang_dir(self.config);
        if !lang_dir.is_dir() {
            warn!(plugin = %plugin.name, dir = %lang_dir.display(), "no translation directory");
            outcome
                .warnings
                .push(ScanWarning::missing_directory(&lang_dir));
            if !used.is_empty() {
                outcome.results.push(AnalysisResult::new(
                    &plugin.name,
                    NO_TRANSLATION_FILE,
                    None,
                    used,
                    BTreeSet::new(),
                ));
            }
            return;
        }

        let files = match list_translation_files(&lang_dir, &self.config.lang_extensions) {
            Ok(files) => files,
            Err(e) => {
                outcome
                    .warnings
                    .push(ScanWarning::read_failed(&lang_dir, format!("{:#}", e)));
                return;
            }
        };

        for path in files {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            match load_translation_keys(&path) {
                Ok(defined) => {
                    debug!(plugin = %plugin.name, file = %file, defined = defined.len(), "parsed translation file");
                    outcome.results.push(AnalysisResult::new(
                        &plugin.name,
                        file,
                        Some(path),
                        used.clone(),
                        defined,
                    ));
                }
                Err(e) => {
                    warn!(file = %path.display(), "skipping malformed translation file");
                    outcome
                        .warnings
                        .push(ScanWarning::parse_failed(&path, format!("{:#}", e)));
                }
            }
        }
    }

    /// Marker keys across all source directories of the plugin, placeholders removed.
    fn used_keys(&self, plugin: &Plugin, outcome: &mut AuditOutcome) -> BTreeSet<String> {
        let scan = scan_sources(
            &plugin.source_dirs(self.config),
            &self.config.code_extensions,
        );
        outcome.source_files_scanned += scan.files.len();
        outcome.warnings.extend(scan.warnings);

        let mut used: BTreeSet<String> = scan
            .files
            .iter()
            .flat_map(|f| extract_keys(&f.content))
            .collect();
        remove_placeholders(&mut used, &self.config.placeholder_keys);
        used
    }
}
