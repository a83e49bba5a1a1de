//! Rewrites relative documentation links to flat wiki page names.
//!
//! Resolution prefers a plausible page over a broken one: when the exact
//! target is unknown the link falls back to the target module's README page,
//! then to the current module's README page, and only stays untouched when
//! neither exists. The validator reports whatever remains unresolved.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

use super::{
    discover::{DocModule, README},
    index::GlobalLinkIndex,
    links::{InlineLink, is_external, map_outside_fences, replace_links, split_anchor},
};
use crate::config::{LinkAlias, WikiConfig};
use crate::utils::{join_relative, normalize_path};

pub struct LinkRewriter<'a> {
    index: &'a GlobalLinkIndex,
    aliases: &'a [LinkAlias],
    next_step_label: &'a str,
    next_step: Regex,
    back_to_index: Regex,
}

impl<'a> LinkRewriter<'a> {
    pub fn new(config: &'a WikiConfig, index: &'a GlobalLinkIndex) -> Result<Self> {
        Ok(Self {
            index,
            aliases: &config.aliases,
            next_step_label: &config.next_step_label,
            next_step: footer_regex(&config.next_step_label, r"\[([^\]]+)\]\(([^)]+)\)")?,
            back_to_index: footer_regex(&config.back_to_index_label, r"\[[^\]]*\]\([^)]+\)")?,
        })
    }

    /// Rewrites every inline link of `content`, a file at `current` inside `module`.
    pub fn rewrite(&self, module: &DocModule, current: &str, content: &str) -> String {
        let rewritten = replace_links(content, |link| self.rewrite_link(module, current, link));

        map_outside_fences(&rewritten, |run| {
            let run = self.next_step.replace_all(run, |caps: &Captures<'_>| {
                format!("---\n\n**{}** → [{}]({})", self.next_step_label, &caps[1], &caps[2])
            });
            self.back_to_index.replace_all(&run, "").into_owned()
        })
    }

    fn rewrite_link(&self, module: &DocModule, current: &str, link: &InlineLink<'_>) -> Option<String> {
        if link.image || is_external(link.target) {
            return None;
        }
        let resolved = self.resolve(module, current, link.target);
        if resolved.is_none() {
            debug!(module = %module.id, file = current, target = link.target, "link left untouched");
        }
        resolved
    }

    /// Resolves a link target to `Page[#anchor]`, or `None` to keep it as written.
    pub fn resolve(&self, module: &DocModule, current: &str, target: &str) -> Option<String> {
        let (base, anchor) = split_anchor(target);
        if base.is_empty() {
            return None;
        }

        let mut base = base.to_string();
        if base.ends_with('/') {
            base.push_str(README);
        }
        let base = base.strip_prefix("./").unwrap_or(&base);

        let joined = join_relative(current, base);
        let cross = self.cross_module(&joined, base);

        let page: Option<&str> = if base.ends_with(".md") {
            let qualified = normalize_path(&format!("{}/{}", module.id, joined));
            self.index
                .get(&qualified)
                .or_else(|| module.page(&joined))
                .or_else(|| module.page(base))
                .or_else(|| self.resolve_alias(&qualified))
                .or_else(|| {
                    cross.and_then(|(target_module, rest)| {
                        self.index
                            .get(&format!("{}/{}", target_module, rest))
                            .or_else(|| self.index.module_home(target_module))
                    })
                })
                .or_else(|| self.index.module_home(&module.id))
        } else {
            cross
                .and_then(|(target_module, _)| self.index.module_home(target_module))
                .or_else(|| self.index.module_home(&module.id))
        };
        let page = page?;

        Some(match anchor {
            Some(anchor) => format!("{}#{}", page, anchor),
            None => page.to_string(),
        })
    }

    fn resolve_alias(&self, qualified: &str) -> Option<&'a str> {
        self.aliases.iter().find_map(|alias| {
            let prefix = qualified.strip_suffix(alias.from.as_str())?;
            if !prefix.is_empty() && !prefix.ends_with('/') {
                return None;
            }
            self.index.get(&format!("{}{}", prefix, alias.to))
        })
    }

    /// `(module, rest)` when the link leaves the current module.
    ///
    /// Either the normalized path escapes the module (`../core/x.md`) or the
    /// raw target climbs out with `../` into a known module from a nested file.
    fn cross_module<'p>(&self, joined: &'p str, raw: &'p str) -> Option<(&'p str, &'p str)> {
        if joined.starts_with("../") {
            return split_module(joined);
        }
        if raw.starts_with("../") {
            let (target_module, rest) = split_module(raw)?;
            if self.index.module_home(target_module).is_some()
                || self.index.get(&format!("{}/{}", target_module, rest)).is_some()
            {
                return Some((target_module, rest));
            }
        }
        None
    }
}

fn split_module(path: &str) -> Option<(&str, &str)> {
    let mut rest = path;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }
    rest.split_once('/')
        .filter(|(module, _)| !module.is_empty() && *module != "." && *module != "..")
}

fn footer_regex(label: &str, link: &str) -> Result<Regex> {
    let pattern = format!(
        r"---\n\n\*\*{}\*\*[ \t]*(?:→|->|:|：)[ \t]*{}",
        regex::escape(label),
        link
    );
    Regex::new(&pattern).with_context(|| format!("Invalid footer pattern for label '{}'", label))
}
