use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".plugkitrc.json";

/// Top-level configuration, one section per pipeline.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub audit: AuditConfig,
    pub compliance: ComplianceConfig,
    pub wiki: WikiConfig,
    pub search: SearchConfig,
}

/// Where plugins, their sources and their translation files live.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditConfig {
    pub plugins_dir: String,
    pub ignored_plugins: Vec<String>,
    /// Directories under each plugin scanned for markers (`bin` holds compiled output).
    pub source_dirs: Vec<String>,
    pub lang_dir: String,
    pub code_extensions: Vec<String>,
    pub lang_extensions: Vec<String>,
    /// Marker payloads that show up in comments and examples, never real keys.
    pub placeholder_keys: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            plugins_dir: "plugins".to_string(),
            ignored_plugins: vec!["build".to_string()],
            source_dirs: vec!["src".to_string(), "bin".to_string()],
            lang_dir: "src/main/resources/lang".to_string(),
            code_extensions: vec!["kt".to_string(), "java".to_string()],
            lang_extensions: vec!["yml".to_string(), "yaml".to_string()],
            placeholder_keys: ["key", "...", "..", "xxx", "xx"].map(String::from).to_vec(),
        }
    }
}

/// The LanguageKeys authoring convention checked by the compliance scorer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceConfig {
    pub score_threshold: f64,
    /// Directory under each plugin checked for direct marker usage and registry references.
    pub source_dir: String,
    pub registry_file: String,
    pub registry_dir: String,
    pub registry_source_dir: String,
    pub registry_symbol: String,
    pub architecture_marker: String,
    pub tiers: Vec<String>,
    pub allowed_literals: Vec<String>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            score_threshold: 80.0,
            source_dir: "src".to_string(),
            registry_file: "LanguageKeys.kt".to_string(),
            registry_dir: "i18n".to_string(),
            registry_source_dir: "src/main/kotlin".to_string(),
            registry_symbol: "LanguageKeys".to_string(),
            architecture_marker: "五层架构".to_string(),
            tiers: ["Core", "Commands", "Gui", "Events", "Log"]
                .map(String::from)
                .to_vec(),
            allowed_literals: vec!["Reloading ExternalBook plugin...".to_string()],
        }
    }
}

/// A recognized documentation subdirectory and how its pages are named and ordered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdirConfig {
    pub name: String,
    /// Sidebar group title.
    pub title: String,
    /// Path inside the subdirectory (e.g. `basic/skull-items.md`) to page label.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Sidebar order: exact keys (`api/pages.md`) or directory prefixes ending in `/`.
    #[serde(default)]
    pub order: Vec<String>,
    /// Removed from sidebar display names in this group.
    #[serde(default)]
    pub strip_prefix: Option<String>,
}

/// Maps one qualified documentation path onto another before fallbacks kick in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkAlias {
    pub from: String,
    pub to: String,
}

/// Documentation tree layout and the naming tables of the generated wiki.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WikiConfig {
    pub docs_dir: String,
    pub output_dir: String,
    pub module_suffix: String,
    pub default_icon: String,
    pub module_icons: BTreeMap<String, String>,
    pub file_labels: BTreeMap<String, String>,
    pub subdirs: Vec<SubdirConfig>,
    pub aliases: Vec<LinkAlias>,
    pub next_step_label: String,
    pub back_to_index_label: String,
    pub description_limit: usize,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            output_dir: "wiki".to_string(),
            module_suffix: "模块".to_string(),
            default_icon: "📄".to_string(),
            module_icons: default_module_icons(),
            file_labels: default_file_labels(),
            subdirs: default_subdirs(),
            aliases: vec![LinkAlias {
                from: "core/schedule.md".to_string(),
                to: "core/scheduler.md".to_string(),
            }],
            next_step_label: "下一步".to_string(),
            back_to_index_label: "返回目录".to_string(),
            description_limit: 50,
        }
    }
}

impl WikiConfig {
    pub fn subdir(&self, name: &str) -> Option<&SubdirConfig> {
        self.subdirs.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub search_dir: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_dir: "modules".to_string(),
        }
    }
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_module_icons() -> BTreeMap<String, String> {
    string_map(&[
        ("gui", "🖱️"),
        ("core", "⚙️"),
        ("config", "⚙️"),
        ("database", "🗄️"),
        ("i18n", "🌐"),
        ("network", "🌐"),
        ("plugins", "🔌"),
        ("troubleshooting", "🔧"),
    ])
}

fn default_file_labels() -> BTreeMap<String, String> {
    string_map(&[
        ("intro.md", "介绍"),
        ("INTRO.md", "介绍"),
        ("quick-start.md", "快速开始"),
        ("GETTING_STARTED.md", "快速开始"),
        ("concepts.md", "基础概念"),
        ("CONCEPTS.md", "基础概念"),
        ("NAVIGATION.md", "文档导航"),
        ("CHANGELOG.md", "更新日志"),
        ("IMPROVEMENTS.md", "改进"),
        ("REORGANIZATION_SUMMARY.md", "重组总结"),
        ("basic-gui.md", "基础GUI"),
        ("paginated-gui.md", "分页GUI"),
        ("scrolling-gui.md", "滚动GUI"),
        ("storage-gui.md", "存储GUI"),
        ("session-management.md", "会话管理"),
        ("task-system.md", "任务系统"),
        ("layout-schemes.md", "布局方案"),
        ("event-handling.md", "事件处理"),
        ("chat-input.md", "聊天输入"),
        ("lifecycle.md", "生命周期管理"),
        ("architecture.md", "架构设计"),
        ("configuration.md", "配置和扩展"),
        ("api-reference.md", "API参考"),
        ("best-practices.md", "最佳实践"),
        ("troubleshooting.md", "故障排除"),
        ("examples.md", "示例代码"),
        ("version-compatibility.md", "版本兼容性"),
        ("i18n-lifecycle-best-practices.md", "国际化生命周期最佳实践"),
        ("scheduler-lifecycle-best-practices.md", "调度器生命周期最佳实践"),
    ])
}

fn default_subdirs() -> Vec<SubdirConfig> {
    vec![
        SubdirConfig {
            name: "tutorials".to_string(),
            title: "📖 教程".to_string(),
            labels: string_map(&[
                ("README.md", "教程索引"),
                ("01-first-gui.md", "教程-第一个GUI"),
                ("02-components.md", "教程-组件使用"),
                ("03-events.md", "教程-事件处理"),
                ("04-sessions.md", "教程-会话管理"),
                ("05-i18n-integration.md", "教程-国际化集成"),
                ("06-advanced-features.md", "教程-高级功能"),
                ("07-infinite-scrolling.md", "教程-无限滚动"),
            ]),
            order: Vec::new(),
            strip_prefix: Some("教程-".to_string()),
        },
        SubdirConfig {
            name: "guides".to_string(),
            title: "🛠️ 指南".to_string(),
            labels: string_map(&[
                ("README.md", "开发指南"),
                ("best-practices.md", "最佳实践"),
                ("performance.md", "性能优化"),
                ("error-handling.md", "错误处理"),
                ("troubleshooting.md", "故障排除"),
            ]),
            order: [
                "guides/README.md",
                "guides/best-practices.md",
                "guides/performance.md",
                "guides/error-handling.md",
                "guides/troubleshooting.md",
            ]
            .map(String::from)
            .to_vec(),
            strip_prefix: None,
        },
        SubdirConfig {
            name: "api".to_string(),
            title: "📚 API".to_string(),
            labels: string_map(&[
                ("README.md", "API总览"),
                ("pages.md", "页面API"),
                ("components.md", "组件API"),
                ("sessions.md", "会话API"),
                ("events.md", "事件API"),
                ("items.md", "物品API"),
            ]),
            order: [
                "api/README.md",
                "api/pages.md",
                "api/components.md",
                "api/sessions.md",
                "api/events.md",
                "api/items.md",
            ]
            .map(String::from)
            .to_vec(),
            strip_prefix: None,
        },
        SubdirConfig {
            name: "examples".to_string(),
            title: "📝 示例".to_string(),
            labels: string_map(&[
                ("README.md", "示例索引"),
                ("basic/enhanced-items-demo.md", "示例-基础-增强物品展示"),
                ("basic/border-components.md", "示例-基础-边框组件"),
                ("basic/skull-items.md", "示例-基础-头颅物品"),
                ("advanced/event-handling-examples.md", "示例-高级-事件处理示例"),
                ("advanced/feature-based-events.md", "示例-高级-特性化事件"),
                ("advanced/component-specific-events.md", "示例-高级-组件特定事件"),
                ("real-world/tpa-plugin-example.md", "示例-实战-TPA插件"),
            ]),
            order: [
                "examples/README.md",
                "examples/basic/",
                "examples/advanced/",
                "examples/real-world/",
            ]
            .map(String::from)
            .to_vec(),
            strip_prefix: None,
        },
    ]
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.compliance.score_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            bail!(
                "Invalid 'compliance.scoreThreshold': {} (expected a value between 0 and 100)",
                threshold
            );
        }

        if self.wiki.description_limit == 0 {
            bail!("Invalid 'wiki.descriptionLimit': must be greater than 0");
        }

        for subdir in &self.wiki.subdirs {
            if subdir.name.trim().is_empty() || subdir.name.contains('/') {
                bail!(
                    "Invalid subdirectory name in 'wiki.subdirs': \"{}\"",
                    subdir.name
                );
            }
        }

        if self.audit.code_extensions.is_empty() {
            bail!("'audit.codeExtensions' must list at least one extension");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audit.plugins_dir, "plugins");
        assert_eq!(config.audit.code_extensions, vec!["kt", "java"]);
        assert_eq!(config.compliance.tiers.len(), 5);
        assert_eq!(config.compliance.score_threshold, 80.0);
        assert_eq!(config.wiki.subdirs.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{
              "audit": { "placeholderKeys": ["example.key"] },
              "wiki": { "moduleSuffix": " Module" }
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.audit.placeholder_keys, vec!["example.key"]);
        assert_eq!(config.audit.plugins_dir, "plugins");
        assert_eq!(config.wiki.module_suffix, " Module");
        assert_eq!(config.wiki.docs_dir, "docs");
        assert_eq!(config.compliance.registry_symbol, "LanguageKeys");
    }

    #[test]
    fn test_subdir_lookup() {
        let config = WikiConfig::default();
        let api = config.subdir("api").unwrap();
        assert_eq!(api.labels.get("pages.md").map(String::as_str), Some("页面API"));
        assert!(config.subdir("misc").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = Config::default();
        config.compliance.score_threshold = 120.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoreThreshold"));
    }

    #[test]
    fn test_validate_rejects_nested_subdir_name() {
        let mut config = Config::default();
        config.wiki.subdirs[0].name = "api/v2".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.wiki.aliases, WikiConfig::default().aliases);
        assert_eq!(config.wiki.subdirs, default_subdirs());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("plugins").join("foo");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "compliance": { "scoreThreshold": 90 } }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.compliance.score_threshold, 90.0);
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.wiki.output_dir, "wiki");
    }

    #[test]
    fn test_load_config_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let err = load_config(dir.path()).err().unwrap();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
