use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_search_default_dir() -> Result<()> {
    let test = CliTest::with_file(
        "modules/gui/Page.kt",
        "title(\"<%gui.title%>\")\nback(\"<%gui.back%>\", \"<%gui.title%>\")\n",
    )?;
    test.write_file("modules/gui/README.md", "<%gui.ignored%>")?;
    test.write_file("modules/core/Core.kt", "fun main() {}")?;

    assert_cmd_snapshot!(test.command().arg("search"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    gui/Page.kt (3 markers)
      gui.back
      gui.title

    Summary: 2 files scanned, 1 with markers, 3 marker instances, 2 unique keys

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_search_custom_dir() -> Result<()> {
    let test = CliTest::with_file("lib/Util.java", "msg(\"<%util.ok%>\");")?;

    assert_cmd_snapshot!(test.command().args(["search", "--dir", "lib"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Util.java (1 marker)
      util.ok

    Summary: 1 file scanned, 1 with markers, 1 marker instance, 1 unique key

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_search_missing_dir() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("search"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Summary: 0 files scanned, 0 with markers, 0 marker instances, 0 unique keys

    ----- stderr -----
    warning: 1 path could not be processed (use -v for details)
    ");

    Ok(())
}
