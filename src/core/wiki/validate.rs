//! Advisory check that every internal link of a generated wiki names a page.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::links::{find_links, is_external, split_anchor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Page file the link appears in.
    pub file: String,
    pub text: String,
    pub link: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub pages_checked: usize,
    pub broken: Vec<BrokenLink>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
    }
}

/// Checks the `*.md` pages directly inside `output_dir`.
///
/// A link is broken when its target (anchor removed) is not the stem of a
/// generated page. External links, pure anchors and resource links (any
/// extension other than `.md`) are skipped, so a leftover `x.md` link is
/// reported. Each occurrence is reported, in page-name order.
pub fn validate_wiki(output_dir: &Path) -> Result<ValidationReport> {
    if !output_dir.is_dir() {
        bail!("Wiki directory not found: {}", output_dir.display());
    }

    let mut pages: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(output_dir)
        .with_context(|| format!("Failed to read directory: {}", output_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
            continue;
        };
        pages.push((name, path));
    }
    pages.sort();

    let page_names: BTreeSet<&str> = pages
        .iter()
        .filter_map(|(name, _)| name.strip_suffix(".md"))
        .collect();

    let mut report = ValidationReport {
        pages_checked: pages.len(),
        ..Default::default()
    };

    for (name, path) in &pages {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        for link in find_links(&content) {
            if link.image || is_external(link.target) {
                continue;
            }
            let (base, _) = split_anchor(link.target);
            if base.is_empty() || page_names.contains(base) || is_resource(base) {
                continue;
            }
            report.broken.push(BrokenLink {
                file: name.clone(),
                text: link.text.to_string(),
                link: link.target.to_string(),
            });
        }
    }

    Ok(report)
}

fn is_resource(target: &str) -> bool {
    Path::new(target)
        .extension()
        .is_some_and(|ext| ext != "md")
}
