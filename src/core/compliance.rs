//! Scores each plugin against the LanguageKeys authoring convention.
//!
//! Every plugin starts at 100 and loses fixed penalties; the score is floored
//! at 0. Violations are recorded in check order so reports are stable.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use super::{
    markers::{contains_marker, is_marker},
    plugins::{Plugin, discover_plugins},
    scanner::{SourceFile, read_source, scan_sources},
};
use crate::config::{AuditConfig, ComplianceConfig};
use crate::issues::ScanWarning;

pub const MISSING_REGISTRY_PENALTY: f64 = 40.0;
pub const DIRECT_USAGE_PENALTY: f64 = 10.0;
pub const UNREFERENCED_REGISTRY_PENALTY: f64 = 20.0;
pub const STRUCTURE_PENALTY: f64 = 5.0;

static CONST_VAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"const\s+val\s+\w+\s*=\s*"(.*?)""#).unwrap());

/// Reporting bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Compliant,
    Acceptable,
    NeedsWork,
    NonCompliant,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Tier::Compliant
        } else if score >= 70.0 {
            Tier::Acceptable
        } else if score >= 50.0 {
            Tier::NeedsWork
        } else {
            Tier::NonCompliant
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Compliant => "compliant",
            Tier::Acceptable => "acceptable",
            Tier::NeedsWork => "needs work",
            Tier::NonCompliant => "non-compliant",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceResult {
    pub plugin: String,
    pub registry_path: Option<PathBuf>,
    /// Plugin-relative paths of files using raw markers without the registry.
    pub direct_usage_files: Vec<String>,
    pub violations: Vec<String>,
    pub score: f64,
}

impl ComplianceResult {
    pub fn has_registry_file(&self) -> bool {
        self.registry_path.is_some()
    }

    pub fn tier(&self) -> Tier {
        Tier::from_score(self.score)
    }
}

#[derive(Debug, Default)]
pub struct ComplianceOutcome {
    pub results: Vec<ComplianceResult>,
    pub warnings: Vec<ScanWarning>,
}

impl ComplianceOutcome {
    pub fn average_score(&self) -> Option<f64> {
        if self.results.is_empty() {
            return None;
        }
        let total: f64 = self.results.iter().map(|r| r.score).sum();
        Some(total / self.results.len() as f64)
    }

    /// Results sorted by descending score, ties by plugin name.
    pub fn ranked(&self) -> Vec<&ComplianceResult> {
        let mut ranked: Vec<_> = self.results.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.plugin.cmp(&b.plugin))
        });
        ranked
    }

    pub fn below(&self, threshold: f64) -> Vec<&ComplianceResult> {
        self.results.iter().filter(|r| r.score < threshold).collect()
    }
}

pub struct ComplianceScorer<'a> {
    audit: &'a AuditConfig,
    config: &'a ComplianceConfig,
}

impl<'a> ComplianceScorer<'a> {
    pub fn new(audit: &'a AuditConfig, config: &'a ComplianceConfig) -> Self {
        Self { audit, config }
    }

    pub fn score(&self, root: &Path, only: &[String]) -> ComplianceOutcome {
        let discovery = discover_plugins(root, self.audit, only);
        let mut outcome = ComplianceOutcome {
            warnings: discovery.warnings,
            ..Default::default()
        };

        for plugin in &discovery.plugins {
            let result = self.score_plugin(plugin, &mut outcome.warnings);
            debug!(plugin = %result.plugin, score = result.score, "scored plugin");
            outcome.results.push(result);
        }

        outcome
    }

    pub fn score_plugin(&self, plugin: &Plugin, warnings: &mut Vec<ScanWarning>) -> ComplianceResult {
        let mut penalty = 0.0;
        let mut violations = Vec::new();

        let registry_path = self.find_registry(plugin);
        if registry_path.is_none() {
            penalty += MISSING_REGISTRY_PENALTY;
            violations.push(format!(
                "missing {} under {}/",
                self.config.registry_file, self.config.registry_dir
            ));
        }

        let scan = scan_sources(
            &[plugin.dir.join(&self.config.source_dir)],
            &self.audit.code_extensions,
        );
        warnings.extend(scan.warnings);
        let sources: Vec<&SourceFile> = scan
            .files
            .iter()
            .filter(|f| !self.is_registry_file(&f.path))
            .collect();

        let direct_usage_files: Vec<String> = sources
            .iter()
            .filter(|f| {
                contains_marker(&f.content) && !f.content.contains(&self.config.registry_symbol)
            })
            .map(|f| relative_display(&f.path, &plugin.dir))
            .collect();
        if !direct_usage_files.is_empty() {
            penalty += DIRECT_USAGE_PENALTY * direct_usage_files.len() as f64;
            violations.push(format!(
                "{} file(s) use <%...%> markers directly instead of {} constants",
                direct_usage_files.len(),
                self.config.registry_symbol
            ));
        }

        if let Some(registry) = &registry_path {
            let reference = format!("{}.", self.config.registry_symbol);
            if !sources.iter().any(|f| f.content.contains(&reference)) {
                penalty += UNREFERENCED_REGISTRY_PENALTY;
                violations.push(format!(
                    "{} exists but is never referenced",
                    self.config.registry_file
                ));
            }

            match read_source(registry) {
                Ok(content) => {
                    let structural = self.check_registry_structure(&content);
                    penalty += STRUCTURE_PENALTY * structural.len() as f64;
                    violations.extend(structural);
                }
                Err(e) => {
                    penalty += STRUCTURE_PENALTY;
                    violations.push(format!("failed to read {}", self.config.registry_file));
                    warnings.push(ScanWarning::read_failed(registry, format!("{:#}", e)));
                }
            }
        }

        ComplianceResult {
            plugin: plugin.name.clone(),
            registry_path,
            direct_usage_files,
            violations,
            score: (100.0 - penalty).max(0.0),
        }
    }

    /// One violation per missing structural element or non-marker constant.
    pub fn check_registry_structure(&self, content: &str) -> Vec<String> {
        let mut violations = Vec::new();
        let symbol = &self.config.registry_symbol;

        if !content.contains(&self.config.architecture_marker) {
            violations.push(format!(
                "missing \"{}\" documentation",
                self.config.architecture_marker
            ));
        }
        if !content.contains(&format!("object {}", symbol)) {
            violations.push(format!("{} should be declared as `object {}`", symbol, symbol));
        }
        for tier in &self.config.tiers {
            if !content.contains(&format!("object {}", tier)) {
                violations.push(format!("missing `object {}` group", tier));
            }
        }

        for caps in CONST_VAL_REGEX.captures_iter(content) {
            let value = &caps[1];
            if !is_marker(value) && !self.config.allowed_literals.iter().any(|l| l == value) {
                violations.push(format!("constant \"{}\" is not a <%key%> marker", value));
            }
        }

        violations
    }

    /// First `<registryDir>/<registryFile>` under the plugin's registry source tree.
    fn find_registry(&self, plugin: &Plugin) -> Option<PathBuf> {
        let root = plugin.dir.join(&self.config.registry_source_dir);
        if !root.is_dir() {
            return None;
        }
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .find(|path| {
                self.is_registry_file(path)
                    && path
                        .parent()
                        .and_then(|p| p.file_name())
                        .is_some_and(|n| n.to_string_lossy() == self.config.registry_dir)
            })
    }

    fn is_registry_file(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|n| n.to_string_lossy() == self.config.registry_file)
    }
}

fn relative_display(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
