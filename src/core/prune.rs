//! Removal of redundant keys from translation files.
//!
//! Files are parsed, edited as a value tree and re-serialized. Mapping order is
//! preserved, non-ASCII text is written as-is and multi-line strings come out as
//! literal blocks.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use serde_yaml::Value;
use tracing::{debug, info, warn};

use super::audit::AnalysisResult;
use super::translations::{key_to_string, parse_translation};
use crate::issues::ScanWarning;

/// A YAML editor that deletes keys by their dotted key paths.
pub struct YamlEditor {
    file_path: PathBuf,
    value: Value,
}

impl YamlEditor {
    /// Open a YAML file for editing.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let value = parse_translation(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?;
        Ok(Self {
            file_path: path.to_path_buf(),
            value,
        })
    }

    pub fn is_empty(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::Mapping(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Delete one key path (e.g. `core.error.stale`).
    ///
    /// Mappings left empty along the path are removed as well. Returns false
    /// when the path does not exist; nothing is changed in that case.
    pub fn delete_key(&mut self, key_path: &str) -> bool {
        let parts: Vec<&str> = key_path.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return false;
        }
        remove_path(&mut self.value, &parts)
    }

    /// Delete several key paths, returning the ones actually removed.
    pub fn delete_keys<'k>(&mut self, key_paths: impl IntoIterator<Item = &'k str>) -> Vec<String> {
        key_paths
            .into_iter()
            .filter(|key| self.delete_key(key))
            .map(String::from)
            .collect()
    }

    /// Current document serialized as YAML.
    pub fn content(&self) -> Result<String> {
        serde_yaml::to_string(&self.value).context("Failed to serialize YAML")
    }

    /// Save the modified document back to the file.
    pub fn save(&self) -> Result<()> {
        let content = self.content()?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))
    }
}

fn remove_path(value: &mut Value, parts: &[&str]) -> bool {
    let Value::Mapping(map) = value else {
        return false;
    };
    let Some((head, rest)) = parts.split_first() else {
        return false;
    };
    let Some(key) = map.keys().find(|k| key_to_string(k) == *head).cloned() else {
        return false;
    };

    if rest.is_empty() {
        return map.shift_remove(&key).is_some();
    }

    let Some(child) = map.get_mut(&key) else {
        return false;
    };
    let removed = remove_path(child, rest);
    if removed && matches!(child, Value::Mapping(m) if m.is_empty()) {
        map.shift_remove(&key);
    }
    removed
}

/// `zh_cn.yml` -> `zh_cn.backup.20250101_120000.yml`, next to the original.
pub fn backup_path(path: &Path, timestamp: NaiveDateTime) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let stamp = timestamp.format("%Y%m%d_%H%M%S");
    let name = match path.extension() {
        Some(ext) => format!("{}.backup.{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}.backup.{}", stem, stamp),
    };
    path.with_file_name(name)
}

#[derive(Debug, Clone, Copy)]
pub struct PruneOptions {
    pub backup: bool,
    pub timestamp: NaiveDateTime,
}

impl PruneOptions {
    pub fn new(backup: bool) -> Self {
        Self {
            backup,
            timestamp: Local::now().naive_local(),
        }
    }
}

/// Outcome for one translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedFile {
    pub plugin: String,
    pub path: PathBuf,
    pub requested: usize,
    pub removed: Vec<String>,
    pub backup: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct PruneSummary {
    pub files: Vec<PrunedFile>,
    pub failures: Vec<ScanWarning>,
}

impl PruneSummary {
    /// Keys actually removed, which may be fewer than were requested.
    pub fn total_removed(&self) -> usize {
        self.files.iter().map(|f| f.removed.len()).sum()
    }
}

/// Removes every result's redundant keys from its translation file.
///
/// Results without redundant keys or without a file are skipped. A file that
/// fails to load, back up or save is recorded in `failures` and left as it was.
pub fn prune_redundant(results: &[AnalysisResult], options: PruneOptions) -> PruneSummary {
    let mut summary = PruneSummary::default();

    for result in results.iter().filter(|r| !r.redundant.is_empty()) {
        let Some(path) = &result.path else {
            continue;
        };
        match prune_file(result, path, options) {
            Ok(file) => summary.files.push(file),
            Err(e) => {
                warn!(file = %path.display(), "prune failed");
                summary
                    .failures
                    .push(ScanWarning::write_failed(path, format!("{:#}", e)));
            }
        }
    }

    summary
}

fn prune_file(result: &AnalysisResult, path: &Path, options: PruneOptions) -> Result<PrunedFile> {
    if !path.is_file() {
        bail!("translation file no longer exists: {}", path.display());
    }

    let mut editor = YamlEditor::open(path)?;
    if editor.is_empty() {
        bail!("file is empty: {}", path.display());
    }

    let backup = if options.backup {
        let target = backup_path(path, options.timestamp);
        fs::copy(path, &target)
            .with_context(|| format!("Failed to back up to {}", target.display()))?;
        debug!(backup = %target.display(), "created backup");
        Some(target)
    } else {
        None
    };

    let removed = editor.delete_keys(result.redundant.iter().map(String::as_str));
    editor.save()?;
    info!(file = %path.display(), removed = removed.len(), "pruned redundant keys");

    Ok(PrunedFile {
        plugin: result.plugin.clone(),
        path: path.to_path_buf(),
        requested: result.redundant.len(),
        removed,
        backup,
    })
}
