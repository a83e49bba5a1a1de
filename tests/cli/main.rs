use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod audit;
mod init;
mod score;
mod search;
mod wiki;

const BIN_NAME: &str = "plugkit";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn audit_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("audit");
        cmd
    }

    pub fn score_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("score");
        cmd
    }

    pub fn wiki_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("wiki");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Stdout of a finished command, lossily decoded.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub const REGISTRY: &str = r#"package tpa.i18n

/**
 * 五层架构: Core, Commands, Gui, Events, Log
 */
object LanguageKeys {
    object Core {
        const val REQUEST = "<%tpa.request%>"
    }
    object Commands {
        const val USAGE = "<%tpa.usage%>"
    }
    object Gui {}
    object Events {}
    object Log {}
}
"#;

/// Two plugins: `tpa` follows the registry convention and has one stale key,
/// `legacy` writes markers inline and has no registry.
pub fn plugin_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file("plugins/tpa/src/main/kotlin/tpa/i18n/LanguageKeys.kt", REGISTRY)?;
    test.write_file(
        "plugins/tpa/src/main/kotlin/tpa/Tpa.kt",
        "fun request() = send(LanguageKeys.Core.REQUEST, LanguageKeys.Commands.USAGE)\n",
    )?;
    test.write_file(
        "plugins/tpa/src/main/resources/lang/zh_cn.yml",
        "tpa:\n  request: 请求传送\n  usage: 用法\n  stale: 旧文本\n",
    )?;
    test.write_file(
        "plugins/legacy/src/main/kotlin/Legacy.kt",
        "fun hello() = send(\"<%legacy.hello%>\")\n",
    )?;
    test.write_file(
        "plugins/legacy/src/main/resources/lang/zh_cn.yml",
        "legacy:\n  hello: 你好\n",
    )?;
    Ok(test)
}
