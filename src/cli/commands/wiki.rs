use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::Result;

use super::super::{
    args::WikiCommand,
    exit_status::ExitStatus,
    report::{print_validation_to, print_warnings_to, print_wiki_clean_to, print_wiki_to},
};
use super::Project;
use crate::core::wiki::{clean_wiki, generate_wiki, validate_wiki};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Link problems are reported but never fail the command.
pub fn wiki(cmd: WikiCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let config = &project.config.wiki;

    let docs_dir = project.resolve(cmd.docs.as_deref().unwrap_or(Path::new(&config.docs_dir)));
    let output_dir = project.resolve(cmd.output.as_deref().unwrap_or(Path::new(&config.output_dir)));

    let mut stdout = io::stdout();
    if cmd.clean {
        let removed = clean_wiki(&output_dir)?;
        print_wiki_clean_to(removed, &output_dir, &mut stdout);
        return Ok(ExitStatus::Success);
    }

    let generated_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

    let build = generate_wiki(&docs_dir, &output_dir, config, &generated_at)?;

    print_wiki_to(&build, &output_dir, project.verbose, &mut stdout);
    print_warnings_to(&build.warnings, project.verbose, &mut io::stderr());

    if !cmd.skip_validation && !build.modules.is_empty() {
        let report = validate_wiki(&output_dir)?;
        let _ = writeln!(stdout);
        print_validation_to(&report, &mut stdout);
    }

    Ok(ExitStatus::Success)
}
