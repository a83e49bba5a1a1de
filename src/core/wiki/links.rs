//! Inline Markdown link scanning shared by the rewriter and the validator.
//!
//! Only single-line `[text](target)` links are recognised. Lines inside
//! fenced code blocks are never touched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static INLINE_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]+)\]\(([^)]+)\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineLink<'a> {
    /// `![alt](src)` rather than `[text](target)`.
    pub image: bool,
    pub text: &'a str,
    /// Trimmed link target.
    pub target: &'a str,
}

impl<'a> InlineLink<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        Some(Self {
            image: !caps.get(1)?.as_str().is_empty(),
            text: caps.get(2)?.as_str(),
            target: caps.get(3)?.as_str().trim(),
        })
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// True for absolute URLs (`https://...`, `mailto://...`, `http...`).
pub fn is_external(target: &str) -> bool {
    target.starts_with("http") || target.contains("://")
}

/// Splits `path#anchor`; an empty anchor is dropped.
pub fn split_anchor(target: &str) -> (&str, Option<&str>) {
    match target.split_once('#') {
        Some((base, anchor)) if !anchor.is_empty() => (base, Some(anchor)),
        Some((base, _)) => (base, None),
        None => (target, None),
    }
}

/// Every link outside fenced code, in document order.
pub fn find_links(content: &str) -> Vec<InlineLink<'_>> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for line in content.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        links.extend(
            INLINE_LINK_REGEX
                .captures_iter(line)
                .filter_map(|caps| InlineLink::from_captures(&caps)),
        );
    }

    links
}

/// Rewrites links outside fenced code.
///
/// `replace` returns the new target, or `None` to leave the link verbatim.
/// Replaced links are emitted as `[text](target)`.
pub fn replace_links<F>(content: &str, mut replace: F) -> String
where
    F: FnMut(&InlineLink<'_>) -> Option<String>,
{
    let mut output = String::with_capacity(content.len());
    let mut in_fence = false;

    for line in content.split_inclusive('\n') {
        if is_fence(line) {
            in_fence = !in_fence;
            output.push_str(line);
            continue;
        }
        if in_fence {
            output.push_str(line);
            continue;
        }

        let replaced = INLINE_LINK_REGEX.replace_all(line, |caps: &Captures<'_>| {
            let original = caps[0].to_string();
            let Some(link) = InlineLink::from_captures(caps) else {
                return original;
            };
            match replace(&link) {
                Some(target) => format!("[{}]({})", link.text, target),
                None => original,
            }
        });
        output.push_str(&replaced);
    }

    output
}

/// Applies `transform` to each run of lines outside fenced code.
///
/// Fence delimiters and fenced lines are copied unchanged. Each run is passed
/// whole, so multi-line patterns can match within it.
pub fn map_outside_fences<F>(content: &str, mut transform: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = String::with_capacity(content.len());
    let mut in_fence = false;
    let mut run_start = 0;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let end = offset + line.len();
        if is_fence(line) {
            if !in_fence {
                output.push_str(&transform(&content[run_start..offset]));
            }
            in_fence = !in_fence;
            output.push_str(line);
            run_start = end;
        } else if in_fence {
            output.push_str(line);
            run_start = end;
        }
        offset = end;
    }

    if run_start < content.len() {
        output.push_str(&transform(&content[run_start..]));
    }
    output
}
