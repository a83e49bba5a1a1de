use std::fs;

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, plugin_project, stdout};

#[test]
fn test_audit_report() -> Result<()> {
    let test = plugin_project()?;

    assert_cmd_snapshot!(test.audit_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    legacy/zh_cn.yml  used 1, defined 1
      ✓ OK

    tpa/zh_cn.yml  used 2, defined 3
      ! redundant (1):
        - tpa.stale

    ✘ 0 missing, 1 redundant key across 2 translation files in 2 plugins
    hint: run with --prune to remove 1 redundant key

    Compliance: 2 plugins, 1 compliant, average score 75.0
      ✓ tpa    100.0  compliant
          registry: plugins/tpa/src/main/kotlin/tpa/i18n/LanguageKeys.kt
      ✘ legacy  50.0  needs work
          direct usage: src/main/kotlin/Legacy.kt
          - missing LanguageKeys.kt under i18n/
          - 1 file(s) use <%...%> markers directly instead of LanguageKeys constants

    hint: add a key registry to: legacy
    hint: replace direct markers with registry constants in: legacy

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_audit_plugin_filter() -> Result<()> {
    let test = plugin_project()?;

    assert_cmd_snapshot!(test.audit_command().args(["--plugins", "legacy"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    legacy/zh_cn.yml  used 1, defined 1
      ✓ OK

    ✓ All keys in sync across 1 translation file in 1 plugin

    Compliance: 1 plugin, 0 compliant, average score 50.0
      ✘ legacy  50.0  needs work
          direct usage: src/main/kotlin/Legacy.kt
          - missing LanguageKeys.kt under i18n/
          - 1 file(s) use <%...%> markers directly instead of LanguageKeys constants

    hint: add a key registry to: legacy
    hint: replace direct markers with registry constants in: legacy

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_prune_with_backup() -> Result<()> {
    let test = plugin_project()?;

    let output = test.audit_command().args(["--prune", "--yes"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Deleted 1 redundant key from 1 file."));

    let content = test.read_file("plugins/tpa/src/main/resources/lang/zh_cn.yml")?;
    assert!(!content.contains("stale"));
    assert!(content.contains("request"));

    let lang_dir = test.root().join("plugins/tpa/src/main/resources/lang");
    let backups: Vec<String> = fs::read_dir(&lang_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("zh_cn.backup."))
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(fs::read_to_string(lang_dir.join(&backups[0]))?.contains("stale"));

    let rerun = stdout(&test.audit_command().output()?);
    assert!(rerun.contains("All keys in sync across 2 translation files in 2 plugins"));

    Ok(())
}

#[test]
fn test_prune_without_backup() -> Result<()> {
    let test = plugin_project()?;

    assert_cmd_snapshot!(test.audit_command().args(["--prune", "--yes", "--no-backup"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    legacy/zh_cn.yml  used 1, defined 1
      ✓ OK

    tpa/zh_cn.yml  used 2, defined 3
      ! redundant (1):
        - tpa.stale

    ✘ 0 missing, 1 redundant key across 2 translation files in 2 plugins

    Compliance: 2 plugins, 1 compliant, average score 75.0
      ✓ tpa    100.0  compliant
          registry: plugins/tpa/src/main/kotlin/tpa/i18n/LanguageKeys.kt
      ✘ legacy  50.0  needs work
          direct usage: src/main/kotlin/Legacy.kt
          - missing LanguageKeys.kt under i18n/
          - 1 file(s) use <%...%> markers directly instead of LanguageKeys constants

    hint: add a key registry to: legacy
    hint: replace direct markers with registry constants in: legacy

    ✓ tpa/zh_cn.yml: removed 1 of 1 redundant key
    Deleted 1 redundant key from 1 file.

    ----- stderr -----
    ");

    let entries = fs::read_dir(test.root().join("plugins/tpa/src/main/resources/lang"))?.count();
    assert_eq!(entries, 1);

    Ok(())
}

#[test]
fn test_prune_without_confirmation_input() -> Result<()> {
    let test = plugin_project()?;

    // stdin is empty, so the prompt gets no answer
    let output = test
        .audit_command()
        .arg("--prune")
        .stdin(std::process::Stdio::null())
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        test.read_file("plugins/tpa/src/main/resources/lang/zh_cn.yml")?
            .contains("stale")
    );

    Ok(())
}

#[test]
fn test_missing_plugins_dir_is_a_warning() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.audit_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Scanned 0 plugins, 0 source files - no template keys to audit

    ✓ No plugins to score

    ----- stderr -----
    warning: 1 path could not be processed (use -v for details)
    ");

    Ok(())
}
