use std::io::{self, Write};

use anyhow::{Result, bail};

use super::super::{
    args::ScoreCommand,
    exit_status::ExitStatus,
    report::{print_compliance_to, print_threshold_to, print_warnings_to},
};
use super::Project;
use crate::core::ComplianceScorer;

pub fn score(cmd: ScoreCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let config = &project.config;

    let threshold = cmd.threshold.unwrap_or(config.compliance.score_threshold);
    if !(0.0..=100.0).contains(&threshold) {
        bail!(
            "Invalid --threshold: {} (expected a value between 0 and 100)",
            threshold
        );
    }

    let outcome =
        ComplianceScorer::new(&config.audit, &config.compliance).score(&project.root, &cmd.plugins);

    let mut stdout = io::stdout();
    print_compliance_to(&outcome, &project.root, &mut stdout);
    let _ = writeln!(stdout);

    let failing = outcome.below(threshold);
    print_threshold_to(&failing, threshold, &mut stdout);
    print_warnings_to(&outcome.warnings, project.verbose, &mut io::stderr());

    if failing.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
