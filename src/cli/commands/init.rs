use std::{fs, io, path::Path};

use anyhow::{Context, Result};

use super::super::exit_status::ExitStatus;
use super::super::report::print_init_to;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    print_init_to(&mut io::stdout());

    Ok(ExitStatus::Success)
}
