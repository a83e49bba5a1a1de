use std::{io, path::Path};

use anyhow::Result;

use super::super::{args::ValidateCommand, exit_status::ExitStatus, report::print_validation_to};
use super::Project;
use crate::core::wiki::validate_wiki;

pub fn validate(cmd: ValidateCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let output_dir = project.resolve(
        cmd.output
            .as_deref()
            .unwrap_or(Path::new(&project.config.wiki.output_dir)),
    );

    let report = validate_wiki(&output_dir)?;
    print_validation_to(&report, &mut io::stdout());

    Ok(ExitStatus::Success)
}
