//! Two-phase wiki build: discover every module, then rewrite every page.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use super::{
    discover::{DocModule, discover_modules},
    index::GlobalLinkIndex,
    pages::{HOME_PAGE, SIDEBAR_PAGE, home_page, sidebar},
    rewrite::LinkRewriter,
};
use crate::config::WikiConfig;
use crate::issues::ScanWarning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    /// File name inside the output directory.
    pub name: String,
    pub bytes: usize,
}

#[derive(Debug, Default)]
pub struct WikiBuild {
    pub modules: Vec<DocModule>,
    /// Pages written to the output directory, navigation pages first.
    pub pages_written: Vec<WrittenPage>,
    pub warnings: Vec<ScanWarning>,
}

impl WikiBuild {
    pub fn total_bytes(&self) -> usize {
        self.pages_written.iter().map(|p| p.bytes).sum()
    }
}

/// Regenerates `output_dir` from `docs_dir`.
///
/// The output directory is deleted and recreated, so it must not be (or
/// contain) the docs directory. `generated_at` is stamped on the home page.
pub fn generate_wiki(
    docs_dir: &Path,
    output_dir: &Path,
    config: &WikiConfig,
    generated_at: &str,
) -> Result<WikiBuild> {
    ensure_distinct(docs_dir, output_dir)?;
    recreate_dir(output_dir)?;

    let discovery = discover_modules(docs_dir, config)?;
    let mut build = WikiBuild {
        warnings: discovery.warnings,
        ..Default::default()
    };
    if discovery.modules.is_empty() {
        warn!(docs = %docs_dir.display(), "no documentation modules found");
        return Ok(build);
    }
    info!(count = discovery.modules.len(), "discovered documentation modules");

    let index = GlobalLinkIndex::build(&discovery.modules);
    let rewriter = LinkRewriter::new(config, &index)?;

    for (name, content) in [
        (HOME_PAGE, home_page(&discovery.modules, generated_at)),
        (SIDEBAR_PAGE, sidebar(&discovery.modules, config)),
    ] {
        build.pages_written.push(write_page(output_dir, name, &content)?);
    }

    for module in &discovery.modules {
        for (source, page_file) in &module.files {
            let source_path = module.dir.join(source);
            let content = match fs::read_to_string(&source_path) {
                Ok(content) => content,
                Err(e) => {
                    build.warnings.push(ScanWarning::read_failed(&source_path, e));
                    continue;
                }
            };

            let rewritten = rewriter.rewrite(module, source, &content);
            match write_page(output_dir, page_file, &rewritten) {
                Ok(page) => {
                    debug!(source = %format!("{}/{}", module.id, source), page = %page_file, "wrote page");
                    build.pages_written.push(page);
                }
                Err(e) => build
                    .warnings
                    .push(ScanWarning::write_failed(output_dir.join(page_file), format!("{:#}", e))),
            }
        }
    }

    build.modules = discovery.modules;
    Ok(build)
}

fn write_page(output_dir: &Path, name: &str, content: &str) -> Result<WrittenPage> {
    let path = output_dir.join(name);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(WrittenPage {
        name: name.to_string(),
        bytes: content.len(),
    })
}

/// Deletes a generated wiki. Returns false when there was nothing to delete.
pub fn clean_wiki(output_dir: &Path) -> Result<bool> {
    if !output_dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(output_dir)
        .with_context(|| format!("Failed to remove directory: {}", output_dir.display()))?;
    Ok(true)
}

fn recreate_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove directory: {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

fn ensure_distinct(docs_dir: &Path, output_dir: &Path) -> Result<()> {
    let docs = absolute(docs_dir);
    let output = absolute(output_dir);
    if docs.starts_with(&output) {
        bail!(
            "Refusing to recreate {}: it contains the docs directory {}",
            output_dir.display(),
            docs_dir.display()
        );
    }
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
