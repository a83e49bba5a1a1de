use std::{io, path::Path};

use anyhow::Result;

use super::super::{
    args::SearchCommand,
    exit_status::ExitStatus,
    report::{print_search_to, print_warnings_to},
};
use super::Project;
use crate::core::search_markers;

pub fn search(cmd: SearchCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let config = &project.config;
    let dir = project.resolve(cmd.dir.as_deref().unwrap_or(Path::new(&config.search.search_dir)));

    let outcome = search_markers(&dir, &config.audit.code_extensions);
    print_search_to(&outcome, &mut io::stdout());
    print_warnings_to(&outcome.warnings, project.verbose, &mut io::stderr());

    Ok(ExitStatus::Success)
}
