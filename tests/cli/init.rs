use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .plugkitrc.json"));

    let content = test.read_file(".plugkitrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for section in ["audit", "compliance", "wiki", "search"] {
        assert!(parsed.get(section).is_some(), "missing '{}' section", section);
    }
    assert_eq!(parsed["compliance"]["scoreThreshold"], 80.0);
    assert_eq!(parsed["audit"]["pluginsDir"], "plugins");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".plugkitrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .plugkitrc.json already exists
    ");
    assert_eq!(test.read_file(".plugkitrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("plugins/foo/src/Foo.kt", "send(\"<%foo.hello%>\")")?;

    let output = test.command().arg("audit").output()?;
    assert!(
        output.status.success(),
        "audit should work with the initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(
        ".plugkitrc.json",
        r#"{ "compliance": { "scoreThreshold": 150 } }"#,
    )?;

    let output = test.command().arg("score").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("scoreThreshold"));

    Ok(())
}
