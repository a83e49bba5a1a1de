//! YAML translation files: discovery, parsing and key-path flattening.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_yaml::Value;

use super::scanner::has_extension;

/// Lists translation files in `lang_dir`, sorted by name.
///
/// Hidden files and anything with "backup" in its name are excluded, so
/// backups written by the prune step are never analyzed.
pub fn list_translation_files(lang_dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(lang_dir)
        .with_context(|| format!("Failed to read directory: {}", lang_dir.display()))?
    {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || name.starts_with('.') || name.to_lowercase().contains("backup") {
            continue;
        }
        if has_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parses YAML text; an empty document is `Null`.
pub fn parse_translation(content: &str) -> Result<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(content).context("Failed to parse YAML")
}

/// Reads and parses a translation file.
pub fn load_translation(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_translation(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
}

/// Reads a translation file and returns its flattened key paths.
pub fn load_translation_keys(path: &Path) -> Result<BTreeSet<String>> {
    load_translation(path).map(|value| flatten_keys(&value))
}

/// Flattens a YAML document into dotted key paths.
///
/// Mapping keys are joined with `.` and sequence elements get `parent[index]`
/// segments. Empty mappings and sequences contribute no key.
pub fn flatten_keys(value: &Value) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    collect_keys(value, "", &mut keys);
    keys
}

fn collect_keys(value: &Value, prefix: &str, keys: &mut BTreeSet<String>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = key_to_string(key);
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_keys(child, &path, keys);
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_keys(item, &format!("{}[{}]", prefix, index), keys);
            }
        }
        Value::Tagged(tagged) => collect_keys(&tagged.value, prefix, keys),
        _ => {
            if !prefix.is_empty() {
                keys.insert(prefix.to_string());
            }
        }
    }
}

/// Renders a mapping key the way it appears in a key path.
pub fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
