use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::super::{
    args::AuditCommand,
    exit_status::ExitStatus,
    report::{print_audit_to, print_compliance_to, print_prune_to, print_warnings_to},
};
use super::Project;
use crate::core::{ComplianceScorer, KeyAuditor, PruneOptions, prune_redundant};
use crate::issues::ScanWarning;
use crate::utils::pluralize;

/// Answers accepted at the prune prompt, compared case-insensitively.
const CONFIRM_ANSWERS: [&str; 3] = ["y", "yes", "是"];

pub fn audit(cmd: AuditCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let config = &project.config;

    let outcome = KeyAuditor::new(&config.audit).audit(&project.root, &cmd.plugins);
    let compliance =
        ComplianceScorer::new(&config.audit, &config.compliance).score(&project.root, &cmd.plugins);

    let mut warnings: Vec<ScanWarning> = outcome
        .warnings
        .iter()
        .chain(&compliance.warnings)
        .cloned()
        .collect();
    warnings.sort();
    warnings.dedup();

    let mut stdout = io::stdout();
    print_audit_to(&outcome, !cmd.prune, &mut stdout);
    let _ = writeln!(stdout);
    print_compliance_to(&compliance, &project.root, &mut stdout);
    print_warnings_to(&warnings, project.verbose, &mut io::stderr());

    let redundant = outcome.total_redundant();
    if !cmd.prune || redundant == 0 {
        return Ok(ExitStatus::Success);
    }

    let files = outcome
        .results
        .iter()
        .filter(|r| r.path.is_some() && !r.redundant.is_empty())
        .count();

    if !cmd.yes {
        let prompt = format!(
            "Delete {} redundant {} from {} {}? [y/N] ",
            redundant,
            pluralize(redundant, "key", "keys"),
            files,
            pluralize(files, "file", "files")
        );
        let _ = writeln!(stdout);
        if !confirm(&prompt, &mut io::stdin().lock(), &mut stdout)? {
            let _ = writeln!(stdout, "{}", "Prune cancelled".yellow());
            return Ok(ExitStatus::Success);
        }
    }

    let summary = prune_redundant(&outcome.results, PruneOptions::new(!cmd.no_backup));
    let _ = writeln!(stdout);
    print_prune_to(&summary, &mut stdout);

    if summary.failures.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}

/// Asks `prompt` and reads one line. No input at all is an error.
fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{}", prompt).context("Failed to write prompt")?;
    output.flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    if read == 0 {
        bail!("No confirmation received; pass --yes to prune without asking");
    }

    let answer = answer.trim().to_lowercase();
    Ok(CONFIRM_ANSWERS.contains(&answer.as_str()))
}
