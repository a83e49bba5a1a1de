use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::plugin_project;

#[test]
fn test_score_below_threshold_fails() -> Result<()> {
    let test = plugin_project()?;

    assert_cmd_snapshot!(test.score_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Compliance: 2 plugins, 1 compliant, average score 75.0
      ✓ tpa    100.0  compliant
          registry: plugins/tpa/src/main/kotlin/tpa/i18n/LanguageKeys.kt
      ✘ legacy  50.0  needs work
          direct usage: src/main/kotlin/Legacy.kt
          - missing LanguageKeys.kt under i18n/
          - 1 file(s) use <%...%> markers directly instead of LanguageKeys constants

    hint: add a key registry to: legacy
    hint: replace direct markers with registry constants in: legacy

    ✘ 1 plugin below the threshold of 80.0:
      - legacy (50.0)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_score_threshold_override() -> Result<()> {
    let test = plugin_project()?;

    let output = test.score_command().args(["--threshold", "50"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(crate::stdout(&output).contains("All plugins score at least 50.0"));

    Ok(())
}

#[test]
fn test_score_threshold_out_of_range() -> Result<()> {
    let test = plugin_project()?;

    let output = test.score_command().args(["--threshold", "120"]).output()?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_score_threshold_from_config() -> Result<()> {
    let test = plugin_project()?;
    test.write_file(".plugkitrc.json", r#"{ "compliance": { "scoreThreshold": 40 } }"#)?;

    let output = test.score_command().output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_score_only_selected_plugins() -> Result<()> {
    let test = plugin_project()?;

    assert_cmd_snapshot!(test.score_command().args(["--plugins", "tpa"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Compliance: 1 plugin, 1 compliant, average score 100.0
      ✓ tpa 100.0  compliant
          registry: plugins/tpa/src/main/kotlin/tpa/i18n/LanguageKeys.kt

    ✓ All plugins score at least 80.0

    ----- stderr -----
    ");

    Ok(())
}
