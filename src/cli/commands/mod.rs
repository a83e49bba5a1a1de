pub mod audit;
pub mod init;
pub mod score;
pub mod search;
pub mod validate;
pub mod wiki;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use super::args::CommonArgs;
use crate::config::{Config, load_config};

/// Project root plus the configuration found for it.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

impl Project {
    pub fn load(common: &CommonArgs) -> Result<Self> {
        let loaded = load_config(&common.root)?;
        debug!(
            root = %common.root.display(),
            from_file = loaded.from_file,
            "loaded configuration"
        );
        Ok(Self {
            root: common.root.clone(),
            config: loaded.config,
            verbose: common.verbose,
        })
    }

    /// Resolves a command-line or config path against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }
}
