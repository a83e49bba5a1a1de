//! Non-fatal findings collected while walking plugin and documentation trees.
//!
//! Every pipeline in [`crate::core`] works on a best-effort basis: a file that
//! cannot be read or parsed is recorded here and skipped, the batch carries on.
//! The CLI layer decides how to present the collected warnings.

use std::fmt;
use std::path::{Path, PathBuf};

/// What went wrong with a single unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningKind {
    /// An expected directory (plugins root, lang dir, docs root) is absent.
    MissingDirectory,
    /// A file or directory could not be read.
    ReadFailed,
    /// A translation file is not valid YAML.
    ParseFailed,
    /// A file could not be written back.
    WriteFailed,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MissingDirectory => write!(f, "missing-directory"),
            WarningKind::ReadFailed => write!(f, "read-failed"),
            WarningKind::ParseFailed => write!(f, "parse-failed"),
            WarningKind::WriteFailed => write!(f, "write-failed"),
        }
    }
}

/// A warning attached to a path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScanWarning {
    pub kind: WarningKind,
    pub path: PathBuf,
    pub message: String,
}

impl ScanWarning {
    pub fn new(kind: WarningKind, path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn missing_directory(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::new(
            WarningKind::MissingDirectory,
            path,
            format!("directory not found: {}", path.display()),
        )
    }

    pub fn read_failed(path: impl AsRef<Path>, error: impl fmt::Display) -> Self {
        Self::new(WarningKind::ReadFailed, path, error.to_string())
    }

    pub fn parse_failed(path: impl AsRef<Path>, error: impl fmt::Display) -> Self {
        Self::new(WarningKind::ParseFailed, path, error.to_string())
    }

    pub fn write_failed(path: impl AsRef<Path>, error: impl fmt::Display) -> Self {
        Self::new(WarningKind::WriteFailed, path, error.to_string())
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.path.display(), self.message, self.kind)
    }
}
