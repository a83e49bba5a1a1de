//! Report formatting and printing utilities.
//!
//! Everything user-facing is printed from here, kept apart from `core` so the
//! pipelines stay usable as a library. Each printer writes to any `Write` so
//! it can be tested against a buffer.

use std::{io::Write, path::Path};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    AuditOutcome, ComplianceOutcome, ComplianceResult, PruneSummary, SearchOutcome, Tier,
    wiki::{ValidationReport, WikiBuild},
};
use crate::issues::ScanWarning;
use crate::utils::pluralize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print non-fatal scan warnings: a one-line count, or every warning with `-v`.
pub fn print_warnings_to<W: Write>(warnings: &[ScanWarning], verbose: bool, writer: &mut W) {
    if warnings.is_empty() {
        return;
    }

    if verbose {
        let mut sorted = warnings.to_vec();
        sorted.sort();
        for warning in &sorted {
            let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), warning);
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} {} could not be processed (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            pluralize(warnings.len(), "path", "paths"),
            "-v".cyan()
        );
    }
}

/// Per plugin and translation file: counts, then missing and redundant keys.
pub fn print_audit_to<W: Write>(outcome: &AuditOutcome, show_prune_hint: bool, writer: &mut W) {
    let translation_files = outcome.results.iter().filter(|r| r.path.is_some()).count();

    if outcome.results.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} {}, {} source {} - no template keys to audit",
                outcome.plugins_scanned,
                pluralize(outcome.plugins_scanned, "plugin", "plugins"),
                outcome.source_files_scanned,
                pluralize(outcome.source_files_scanned, "file", "files"),
            )
            .green()
        );
        return;
    }

    for result in &outcome.results {
        let _ = writeln!(
            writer,
            "{}  {}",
            format!("{}/{}", result.plugin, result.file).bold(),
            format!("used {}, defined {}", result.used.len(), result.defined.len()).dimmed()
        );

        if result.is_clean() {
            let _ = writeln!(writer, "  {} {}", SUCCESS_MARK.green(), "OK".green());
        }
        if !result.missing.is_empty() {
            let _ = writeln!(
                writer,
                "  {} {}",
                FAILURE_MARK.red(),
                format!("missing ({}):", result.missing.len()).red()
            );
            for key in &result.missing {
                let _ = writeln!(writer, "    - {}", key);
            }
        }
        if !result.redundant.is_empty() {
            let _ = writeln!(
                writer,
                "  {} {}",
                "!".yellow(),
                format!("redundant ({}):", result.redundant.len()).yellow()
            );
            for key in &result.redundant {
                let _ = writeln!(writer, "    - {}", key);
            }
        }
        let _ = writeln!(writer);
    }

    let missing = outcome.total_missing();
    let redundant = outcome.total_redundant();
    let scope = format!(
        "{} translation {} in {} {}",
        translation_files,
        pluralize(translation_files, "file", "files"),
        outcome.plugins_scanned,
        pluralize(outcome.plugins_scanned, "plugin", "plugins"),
    );

    if missing == 0 && redundant == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("All keys in sync across {}", scope).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} missing, {} redundant {} across {}",
            FAILURE_MARK.red(),
            missing,
            redundant,
            pluralize(missing + redundant, "key", "keys"),
            scope
        );
    }

    if show_prune_hint && redundant > 0 {
        let _ = writeln!(
            writer,
            "{} run with {} to remove {} redundant {}",
            "hint:".bold().cyan(),
            "--prune".cyan(),
            redundant,
            pluralize(redundant, "key", "keys")
        );
    }
}

/// Plugins by descending score, with registry, direct usages and violations.
pub fn print_compliance_to<W: Write>(outcome: &ComplianceOutcome, root: &Path, writer: &mut W) {
    let Some(average) = outcome.average_score() else {
        let _ = writeln!(writer, "{} No plugins to score", SUCCESS_MARK.green());
        return;
    };

    let compliant = outcome
        .results
        .iter()
        .filter(|r| r.tier() == Tier::Compliant)
        .count();
    let _ = writeln!(
        writer,
        "{} {} {}, {} compliant, average score {:.1}",
        "Compliance:".bold(),
        outcome.results.len(),
        pluralize(outcome.results.len(), "plugin", "plugins"),
        compliant,
        average
    );

    let width = outcome
        .results
        .iter()
        .map(|r| UnicodeWidthStr::width(r.plugin.as_str()))
        .max()
        .unwrap_or(0);

    for result in outcome.ranked() {
        print_compliance_result(result, root, width, writer);
    }

    let without_registry: Vec<&str> = outcome
        .results
        .iter()
        .filter(|r| !r.has_registry_file())
        .map(|r| r.plugin.as_str())
        .collect();
    let direct_usage: Vec<&str> = outcome
        .results
        .iter()
        .filter(|r| !r.direct_usage_files.is_empty())
        .map(|r| r.plugin.as_str())
        .collect();

    if !without_registry.is_empty() || !direct_usage.is_empty() {
        let _ = writeln!(writer);
    }
    if !without_registry.is_empty() {
        let _ = writeln!(
            writer,
            "{} add a key registry to: {}",
            "hint:".bold().cyan(),
            without_registry.join(", ")
        );
    }
    if !direct_usage.is_empty() {
        let _ = writeln!(
            writer,
            "{} replace direct markers with registry constants in: {}",
            "hint:".bold().cyan(),
            direct_usage.join(", ")
        );
    }
}

fn print_compliance_result<W: Write>(
    result: &ComplianceResult,
    root: &Path,
    width: usize,
    writer: &mut W,
) {
    let tier = result.tier();
    let mark = match tier {
        Tier::Compliant => SUCCESS_MARK.green(),
        Tier::Acceptable | Tier::NeedsWork => FAILURE_MARK.yellow(),
        Tier::NonCompliant => FAILURE_MARK.red(),
    };
    let padding = width.saturating_sub(UnicodeWidthStr::width(result.plugin.as_str()));

    let _ = writeln!(
        writer,
        "  {} {}{} {:>5.1}  {}",
        mark,
        result.plugin.bold(),
        " ".repeat(padding),
        result.score,
        tier.to_string().dimmed()
    );

    if let Some(registry) = &result.registry_path {
        let shown = registry.strip_prefix(root).unwrap_or(registry);
        let _ = writeln!(writer, "      {} {}", "registry:".dimmed(), shown.display());
    }
    for file in &result.direct_usage_files {
        let _ = writeln!(writer, "      {} {}", "direct usage:".dimmed(), file);
    }
    for violation in &result.violations {
        let _ = writeln!(writer, "      - {}", violation);
    }
}

/// Result of the `score` gate.
pub fn print_threshold_to<W: Write>(failing: &[&ComplianceResult], threshold: f64, writer: &mut W) {
    if failing.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("All plugins score at least {:.1}", threshold).green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} {} below the threshold of {:.1}:",
        FAILURE_MARK.red(),
        failing.len(),
        pluralize(failing.len(), "plugin", "plugins"),
        threshold
    );
    for result in failing {
        let _ = writeln!(writer, "  - {} ({:.1})", result.plugin, result.score);
    }
}

pub fn print_prune_to<W: Write>(summary: &PruneSummary, writer: &mut W) {
    for file in &summary.files {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let _ = writeln!(
            writer,
            "{} {}/{}: removed {} of {} redundant {}",
            SUCCESS_MARK.green(),
            file.plugin,
            name,
            file.removed.len(),
            file.requested,
            pluralize(file.requested, "key", "keys")
        );
        if let Some(backup) = &file.backup {
            let _ = writeln!(writer, "    {} {}", "backup:".dimmed(), backup.display());
        }
    }

    for failure in &summary.failures {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), failure);
    }

    let total = summary.total_removed();
    let _ = writeln!(
        writer,
        "{} {} redundant {} from {} {}.",
        "Deleted".green().bold(),
        total,
        pluralize(total, "key", "keys"),
        summary.files.len(),
        pluralize(summary.files.len(), "file", "files")
    );
}

/// Generation summary; `list_pages` adds every written page with its size.
pub fn print_wiki_to<W: Write>(
    build: &WikiBuild,
    output_dir: &Path,
    list_pages: bool,
    writer: &mut W,
) {
    if build.modules.is_empty() {
        let _ = writeln!(
            writer,
            "{} No documentation modules found",
            FAILURE_MARK.red()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} {} ({:.1} KB) for {} {} in {}",
            build.pages_written.len(),
            pluralize(build.pages_written.len(), "page", "pages"),
            build.total_bytes() as f64 / 1024.0,
            build.modules.len(),
            pluralize(build.modules.len(), "module", "modules"),
            output_dir.display()
        )
        .green()
    );
    for module in &build.modules {
        let _ = writeln!(
            writer,
            "  {} {} ({} {})",
            module.icon,
            module.display_name,
            module.files.len(),
            pluralize(module.files.len(), "page", "pages")
        );
    }

    if list_pages {
        let width = build
            .pages_written
            .iter()
            .map(|p| UnicodeWidthStr::width(p.name.as_str()))
            .max()
            .unwrap_or(0);
        let _ = writeln!(writer);
        for page in &build.pages_written {
            let padding = width.saturating_sub(UnicodeWidthStr::width(page.name.as_str()));
            let _ = writeln!(
                writer,
                "  - {}{} {:>7} bytes",
                page.name,
                " ".repeat(padding),
                page.bytes
            );
        }
    }
}

pub fn print_wiki_clean_to<W: Write>(removed: bool, output_dir: &Path, writer: &mut W) {
    if removed {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Removed {}", output_dir.display()).green()
        );
    } else {
        let _ = writeln!(writer, "Nothing to clean: {} does not exist", output_dir.display());
    }
}

pub fn print_validation_to<W: Write>(report: &ValidationReport, writer: &mut W) {
    if report.is_clean() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} - all links are valid",
                report.pages_checked,
                pluralize(report.pages_checked, "page", "pages")
            )
            .green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} Found {} broken {}:",
        FAILURE_MARK.red(),
        report.broken.len(),
        pluralize(report.broken.len(), "link", "links")
    );
    for broken in &report.broken {
        let _ = writeln!(writer, "  {}: [{}]({})", broken.file.bold(), broken.text, broken.link);
    }
}

pub fn print_search_to<W: Write>(outcome: &SearchOutcome, writer: &mut W) {
    for file in &outcome.files {
        let _ = writeln!(
            writer,
            "{} {}",
            file.path.bold(),
            format!(
                "({} {})",
                file.occurrences,
                pluralize(file.occurrences, "marker", "markers")
            )
            .dimmed()
        );
        for key in &file.keys {
            let _ = writeln!(writer, "  {}", key);
        }
    }
    if !outcome.files.is_empty() {
        let _ = writeln!(writer);
    }

    let unique = outcome.unique_keys().len();
    let _ = writeln!(
        writer,
        "{} {} {} scanned, {} with markers, {} marker {}, {} unique {}",
        "Summary:".bold(),
        outcome.files_scanned,
        pluralize(outcome.files_scanned, "file", "files"),
        outcome.files.len(),
        outcome.total_occurrences(),
        pluralize(outcome.total_occurrences(), "instance", "instances"),
        unique,
        pluralize(unique, "key", "keys")
    );
}

pub fn print_init_to<W: Write>(writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}
