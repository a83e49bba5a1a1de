//! Documentation module discovery and page naming.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{SubdirConfig, WikiConfig};
use crate::issues::ScanWarning;
use crate::utils::title_case;

pub const README: &str = "README.md";

/// One top-level directory of the docs tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocModule {
    pub id: String,
    pub dir: PathBuf,
    pub display_name: String,
    pub icon: String,
    pub description: String,
    /// Source path relative to the module (`api/pages.md`) to wiki file name.
    pub files: BTreeMap<String, String>,
    /// Same keys as `files`, page names without `.md`.
    pub links: BTreeMap<String, String>,
}

impl DocModule {
    fn insert_page(&mut self, source: String, page: String) {
        self.files.insert(source.clone(), format!("{}.md", page));
        self.links.insert(source, page);
    }

    pub fn page(&self, source: &str) -> Option<&str> {
        self.links.get(source).map(String::as_str)
    }

    /// The page a module link should point at: its README page, else its first page.
    pub fn main_page(&self) -> Option<&str> {
        self.page(README)
            .or_else(|| self.links.values().next().map(String::as_str))
    }
}

#[derive(Debug, Default)]
pub struct ModuleDiscovery {
    pub modules: Vec<DocModule>,
    pub warnings: Vec<ScanWarning>,
}

/// Finds every documentation module under `docs_root`, sorted by id.
///
/// A module is a non-hidden directory with at least one top-level `*.md`.
pub fn discover_modules(docs_root: &Path, config: &WikiConfig) -> Result<ModuleDiscovery> {
    let mut discovery = ModuleDiscovery::default();
    if !docs_root.is_dir() {
        discovery
            .warnings
            .push(ScanWarning::missing_directory(docs_root));
        return Ok(discovery);
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(docs_root)
        .with_context(|| format!("Failed to read directory: {}", docs_root.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    for dir in dirs {
        let Some(id) = dir.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        if id.starts_with('.') || id == "__pycache__" {
            continue;
        }

        let top_level = match top_level_markdown(&dir) {
            Ok(files) => files,
            Err(e) => {
                discovery
                    .warnings
                    .push(ScanWarning::read_failed(&dir, format!("{:#}", e)));
                continue;
            }
        };
        if top_level.is_empty() {
            debug!(module = %id, "no markdown files, skipping");
            continue;
        }

        let module = build_module(&id, &dir, &top_level, config, &mut discovery.warnings);
        debug!(module = %id, pages = module.files.len(), "discovered module");
        discovery.modules.push(module);
    }

    Ok(discovery)
}

fn top_level_markdown(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && name.ends_with(".md")
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn build_module(
    id: &str,
    dir: &Path,
    top_level: &[String],
    config: &WikiConfig,
    warnings: &mut Vec<ScanWarning>,
) -> DocModule {
    let display_name = format!("{}{}", id.to_uppercase(), config.module_suffix);
    let mut module = DocModule {
        id: id.to_string(),
        dir: dir.to_path_buf(),
        icon: config
            .module_icons
            .get(id)
            .unwrap_or(&config.default_icon)
            .clone(),
        description: module_description(id, dir, top_level, config, warnings),
        display_name,
        files: BTreeMap::new(),
        links: BTreeMap::new(),
    };

    for name in top_level {
        let page = if name == README {
            module.display_name.clone()
        } else {
            let label = config
                .file_labels
                .get(name)
                .cloned()
                .unwrap_or_else(|| fallback_label(name));
            format!("{}-{}", module.display_name, label)
        };
        module.insert_page(name.clone(), page);
    }

    for subdir in &config.subdirs {
        let subdir_path = dir.join(&subdir.name);
        if !subdir_path.is_dir() {
            continue;
        }
        for inner in subdir_markdown(&subdir_path, warnings) {
            let label = subdir_label(subdir, &inner);
            let page = format!("{}-{}", module.display_name, label);
            module.insert_page(format!("{}/{}", subdir.name, inner), page);
        }
    }

    module
}

/// Markdown files below a recognised subdirectory, as `/`-separated inner paths.
fn subdir_markdown(dir: &Path, warnings: &mut Vec<ScanWarning>) -> Vec<String> {
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
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(inner) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let inner = inner.to_string_lossy().replace('\\', "/");
        if inner.ends_with(".md") {
            files.push(inner);
        }
    }
    files
}

fn subdir_label(subdir: &SubdirConfig, inner: &str) -> String {
    subdir
        .labels
        .get(inner)
        .cloned()
        .unwrap_or_else(|| fallback_label(inner))
}

/// `event-handling.md` -> `Event Handling`, `basic/skull-items.md` -> `Basic Skull Items`.
pub fn fallback_label(path: &str) -> String {
    let stem = path.strip_suffix(".md").unwrap_or(path);
    title_case(&stem.replace(['/', '-'], " "))
}

fn module_description(
    id: &str,
    dir: &Path,
    top_level: &[String],
    config: &WikiConfig,
    warnings: &mut Vec<ScanWarning>,
) -> String {
    let default = || format!("{} {}文档", title_case(id), config.module_suffix);
    if !top_level.iter().any(|name| name == README) {
        return default();
    }

    let readme = dir.join(README);
    match fs::read_to_string(&readme) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("---"))
            .map(|line| truncate(line, config.description_limit))
            .unwrap_or_else(default),
        Err(e) => {
            warnings.push(ScanWarning::read_failed(&readme, e));
            default()
        }
    }
}

fn truncate(line: &str, limit: usize) -> String {
    if line.chars().count() > limit {
        format!("{}...", line.chars().take(limit).collect::<String>())
    } else {
        line.to_string()
    }
}
