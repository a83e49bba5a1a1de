use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::issues::ScanWarning;

/// A code file loaded into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// Result of scanning source directories.
#[derive(Debug, Default)]
pub struct SourceScan {
    pub files: Vec<SourceFile>,
    pub warnings: Vec<ScanWarning>,
}

/// Case-insensitive extension check against a list such as `["kt", "java"]`.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Lists code files under `dir`, recursively, in a stable order.
///
/// Entries that cannot be accessed are recorded in `warnings` and skipped.
pub fn collect_code_files(
    dir: &Path,
    extensions: &[String],
    warnings: &mut Vec<ScanWarning>,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                warnings.push(ScanWarning::read_failed(path, e));
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files
}

/// Reads a code file, replacing invalid UTF-8 sequences instead of failing.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Loads every code file under the existing directories among `dirs`.
///
/// Missing directories are silently skipped; unreadable files become warnings.
pub fn scan_sources(dirs: &[PathBuf], extensions: &[String]) -> SourceScan {
    let mut scan = SourceScan::default();

    for dir in dirs.iter().filter(|d| d.is_dir()) {
        let paths = collect_code_files(dir, extensions, &mut scan.warnings);
        debug!(dir = %dir.display(), files = paths.len(), "scanning sources");

        for path in paths {
            match read_source(&path) {
                Ok(content) => scan.files.push(SourceFile { path, content }),
                Err(e) => scan.warnings.push(ScanWarning::read_failed(&path, format!("{:#}", e))),
            }
        }
    }

    scan
}
