//! Generated navigation pages: `Home.md` and `_Sidebar.md`.

use std::{fmt::Write as _, sync::LazyLock};

use regex::Regex;

use super::discover::{DocModule, README};
use crate::config::{SubdirConfig, WikiConfig};

pub const HOME_PAGE: &str = "Home.md";
pub const SIDEBAR_PAGE: &str = "_Sidebar.md";

const QUICK_START: &str = "quick-start.md";

static LEADING_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-").unwrap());

/// Builds the wiki landing page. `generated_at` is printed verbatim.
pub fn home_page(modules: &[DocModule], generated_at: &str) -> String {
    let mut out = String::from(
        "# 📚 项目文档\n\n欢迎使用项目文档！本文档包含了所有模块的完整使用指南。\n\n## 🎯 模块导航\n\n",
    );

    for module in modules {
        match module.main_page() {
            Some(page) => {
                let _ = writeln!(out, "### {} [{}]({})\n", module.icon, module.display_name, page);
            }
            None => {
                let _ = writeln!(out, "### {} {}\n", module.icon, module.display_name);
            }
        }

        if !module.description.is_empty() {
            let _ = writeln!(out, "{}\n", module.description);
        }

        for (source, label) in [
            (QUICK_START, "🚀 快速开始"),
            ("api-reference.md", "📋 API参考"),
            ("examples.md", "📝 示例代码"),
        ] {
            if let Some(page) = module.page(source) {
                let _ = writeln!(out, "- [{}]({})", label, page);
            }
        }
        out.push('\n');
    }

    out.push_str(
        "## 📖 如何使用\n\n\
         1. **选择模块** - 点击上方的模块链接进入对应文档\n\
         2. **快速开始** - 每个模块都有快速开始指南\n\
         3. **深入学习** - 查看详细的功能指南和API参考\n\
         4. **解决问题** - 参考故障排除和最佳实践\n\n\
         ---\n\n",
    );
    let _ = writeln!(out, "🔄 **最后更新**: {}", generated_at);
    out
}

/// Builds the wiki sidebar: module home, quick start, one group per
/// recognised subdirectory, then everything else.
pub fn sidebar(modules: &[DocModule], config: &WikiConfig) -> String {
    let mut out = String::from("## 📚 项目文档\n\n### 🏠 主页\n- [📖 文档首页](Home)\n\n");

    for module in modules {
        let _ = writeln!(out, "### {} {}", module.icon, module.display_name);
        if let Some(page) = module.page(README) {
            let _ = writeln!(out, "- [📖 模块首页]({})", page);
        }
        if let Some(page) = module.page(QUICK_START) {
            let _ = writeln!(out, "- [🚀 快速开始]({})", page);
        }

        for subdir in &config.subdirs {
            write_group(&mut out, module, subdir);
        }

        let others: Vec<(&String, &String)> = module
            .links
            .iter()
            .filter(|(source, _)| {
                !source.contains('/') && source.as_str() != README && source.as_str() != QUICK_START
            })
            .collect();
        if !others.is_empty() {
            out.push_str("- 其他\n");
            for (_, page) in others {
                let _ = writeln!(out, "  - [{}]({})", display_name(module, page, None), page);
            }
        }

        out.push('\n');
    }

    out
}

fn write_group(out: &mut String, module: &DocModule, subdir: &SubdirConfig) {
    let prefix = format!("{}/", subdir.name);
    let mut entries: Vec<(&str, &str)> = module
        .links
        .iter()
        .filter(|(source, _)| source.starts_with(&prefix))
        .map(|(source, page)| (source.as_str(), page.as_str()))
        .collect();
    if entries.is_empty() {
        return;
    }

    let index_key = format!("{}{}", prefix, README);
    match module.page(&index_key) {
        Some(page) => {
            let _ = writeln!(out, "- [{}]({})", subdir.title, page);
            let _ = writeln!(out, "  - [索引]({})", page);
        }
        None => {
            let _ = writeln!(out, "- {}", subdir.title);
        }
    }

    entries.retain(|(source, _)| *source != index_key);
    entries.sort_by_cached_key(|(source, _)| sort_key(subdir, source));
    for (_, page) in entries {
        let display = display_name(module, page, subdir.strip_prefix.as_deref());
        let _ = writeln!(out, "  - [{}]({})", display, page);
    }
}

/// Configured position, then leading number (`01-...`), then the key itself.
fn sort_key(subdir: &SubdirConfig, source: &str) -> (usize, u64, String) {
    let rank = subdir
        .order
        .iter()
        .position(|entry| {
            entry == source || (entry.ends_with('/') && source.starts_with(entry.as_str()))
        })
        .unwrap_or(subdir.order.len());

    let inner = source
        .strip_prefix(subdir.name.as_str())
        .and_then(|s| s.strip_prefix('/'))
        .unwrap_or(source);
    let number = LEADING_NUMBER_REGEX
        .captures(inner)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(u64::MAX);

    (rank, number, source.to_string())
}

fn display_name(module: &DocModule, page: &str, strip: Option<&str>) -> String {
    let module_prefix = format!("{}-", module.display_name);
    let name = page.strip_prefix(&module_prefix).unwrap_or(page);
    strip
        .and_then(|s| name.strip_prefix(s))
        .unwrap_or(name)
        .to_string()
}
