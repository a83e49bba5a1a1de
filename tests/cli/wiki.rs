use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stdout};

fn docs_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "docs/core/README.md",
        "# Core\n\nScheduling and lifecycle.\n\n- [Scheduler](scheduler.md)\n- [Old link](schedule.md)\n",
    )?;
    test.write_file("docs/core/scheduler.md", "# Scheduler\n\nSee the [GUI](../gui/README.md#pages).\n")?;
    test.write_file(
        "docs/gui/README.md",
        "# GUI\n\n![shot](shot.png)\n\n```\n[fenced](not-a-page.md)\n```\n",
    )?;
    test.write_file(
        "docs/gui/quick-start.md",
        "# Quick start\n\nBack to [core](../core/README.md).\n\n---\n\n**下一步** → [API](api/pages.md)\n",
    )?;
    test.write_file("docs/gui/api/pages.md", "# Pages\n")?;
    // no README, so unknown targets have no module home to fall back to
    test.write_file(
        "docs/tools/intro.md",
        "# Tools\n\n[raw](Nowhere)\n\n[gone](missing.md)\n",
    )?;
    Ok(test)
}

#[test]
fn test_wiki_generates_flat_pages() -> Result<()> {
    let test = docs_project()?;

    insta::with_settings!({filters => vec![(r"\(\d+\.\d KB\)", "([SIZE] KB)")]}, {
        assert_cmd_snapshot!(test.wiki_command(), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Generated 8 pages ([SIZE] KB) for 3 modules in ./wiki
          ⚙️ CORE模块 (2 pages)
          🖱️ GUI模块 (3 pages)
          📄 TOOLS模块 (1 page)

        ✘ Found 2 broken links:
          TOOLS模块-介绍.md: [raw](Nowhere)
          TOOLS模块-介绍.md: [gone](missing.md)

        ----- stderr -----
        ");
    });

    let core = test.read_file("wiki/CORE模块.md")?;
    assert!(core.contains("- [Scheduler](CORE模块-Scheduler)"));
    assert!(core.contains("- [Old link](CORE模块-Scheduler)"));
    assert!(
        test.read_file("wiki/CORE模块-Scheduler.md")?
            .contains("See the [GUI](GUI模块#pages).")
    );
    let quick_start = test.read_file("wiki/GUI模块-快速开始.md")?;
    assert!(quick_start.contains("Back to [core](CORE模块)."));
    assert!(quick_start.contains("**下一步** → [API](GUI模块-页面API)"));
    assert!(test.read_file("wiki/GUI模块.md")?.contains("[fenced](not-a-page.md)"));

    let sidebar = test.read_file("wiki/_Sidebar.md")?;
    assert!(sidebar.contains("- [🚀 快速开始](GUI模块-快速开始)"));
    assert!(test.read_file("wiki/Home.md")?.contains("Scheduling and lifecycle."));

    Ok(())
}

#[test]
fn test_wiki_verbose_lists_page_sizes() -> Result<()> {
    let test = docs_project()?;

    let output = test.wiki_command().arg("-v").output()?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    let home = test.read_file("wiki/Home.md")?;
    let listed: Vec<&str> = out.lines().filter(|line| line.starts_with("  - ")).collect();
    assert_eq!(listed.len(), 8);
    let home_size = format!(" {} bytes", home.len());
    assert!(
        listed
            .iter()
            .any(|line| line.starts_with("  - Home.md") && line.ends_with(&home_size))
    );
    assert!(listed.iter().any(|line| line.starts_with("  - TOOLS模块-介绍.md")));

    Ok(())
}

#[test]
fn test_wiki_skip_validation_and_output_override() -> Result<()> {
    let test = docs_project()?;

    let output = test
        .wiki_command()
        .args(["--output", "site", "--skip-validation"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("site/Home.md").exists());
    assert!(!test.root().join("wiki").exists());
    assert!(!stdout(&output).contains("broken"));

    Ok(())
}

#[test]
fn test_wiki_clean() -> Result<()> {
    let test = docs_project()?;
    test.wiki_command().output()?;

    assert_cmd_snapshot!(test.wiki_command().arg("--clean"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Removed ./wiki

    ----- stderr -----
    ");
    assert!(!test.root().join("wiki").exists());
    assert!(test.root().join("docs/core/README.md").exists());

    assert_cmd_snapshot!(test.wiki_command().arg("--clean"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Nothing to clean: ./wiki does not exist

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_validate_command() -> Result<()> {
    let test = docs_project()?;
    test.wiki_command().output()?;

    assert_cmd_snapshot!(test.command().arg("validate"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✘ Found 2 broken links:
      TOOLS模块-介绍.md: [raw](Nowhere)
      TOOLS模块-介绍.md: [gone](missing.md)

    ----- stderr -----
    ");

    assert_cmd_snapshot!(test.command().args(["validate", "--output", "missing"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Wiki directory not found: ./missing
    ");

    Ok(())
}

#[test]
fn test_wiki_refuses_docs_as_output() -> Result<()> {
    let test = docs_project()?;

    assert_cmd_snapshot!(test.wiki_command().args(["--output", "docs"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Refusing to recreate ./docs: it contains the docs directory ./docs
    ");
    assert!(test.root().join("docs/core/README.md").exists());

    Ok(())
}
