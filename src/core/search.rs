//! Marker search over an arbitrary source tree.

use std::{collections::BTreeSet, path::Path};

use super::{
    markers::find_markers,
    scanner::scan_sources,
};
use crate::issues::ScanWarning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMarkers {
    /// Path relative to the searched directory.
    pub path: String,
    pub keys: BTreeSet<String>,
    pub occurrences: usize,
}

#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub files: Vec<FileMarkers>,
    pub files_scanned: usize,
    pub warnings: Vec<ScanWarning>,
}

impl SearchOutcome {
    pub fn total_occurrences(&self) -> usize {
        self.files.iter().map(|f| f.occurrences).sum()
    }

    pub fn unique_keys(&self) -> BTreeSet<&str> {
        self.files
            .iter()
            .flat_map(|f| f.keys.iter().map(String::as_str))
            .collect()
    }
}

/// Lists every code file under `dir` containing at least one marker.
pub fn search_markers(dir: &Path, extensions: &[String]) -> SearchOutcome {
    if !dir.is_dir() {
        return SearchOutcome {
            warnings: vec![ScanWarning::missing_directory(dir)],
            ..Default::default()
        };
    }

    let scan = scan_sources(&[dir.to_path_buf()], extensions);
    let mut outcome = SearchOutcome {
        files_scanned: scan.files.len(),
        warnings: scan.warnings,
        ..Default::default()
    };

    for file in &scan.files {
        let found = find_markers(&file.content);
        if found.is_empty() {
            continue;
        }
        let path = file
            .path
            .strip_prefix(dir)
            .unwrap_or(&file.path)
            .to_string_lossy()
            .replace('\\', "/");
        outcome.files.push(FileMarkers {
            path,
            occurrences: found.len(),
            keys: found.into_iter().map(String::from).collect(),
        });
    }

    outcome
}
