//! Template marker grammar: `<%dotted.key%>`.
//!
//! Markers are matched case-sensitively; there is no escaping mechanism.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static TEMPLATE_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<%([A-Za-z0-9_.]+)%>").unwrap());

/// Returns every marker payload in `content`, in order of appearance, duplicates included.
pub fn find_markers(content: &str) -> Vec<&str> {
    TEMPLATE_MARKER_REGEX
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Returns the distinct marker payloads in `content`.
pub fn extract_keys(content: &str) -> BTreeSet<String> {
    find_markers(content).into_iter().map(String::from).collect()
}

/// True if `content` contains at least one marker.
pub fn contains_marker(content: &str) -> bool {
    TEMPLATE_MARKER_REGEX.is_match(content)
}

/// True if `value` is exactly one marker and nothing else.
pub fn is_marker(value: &str) -> bool {
    value.len() > 4
        && value.starts_with("<%")
        && value.ends_with("%>")
        && find_markers(value).first().map(|k| k.len()) == Some(value.len() - 4)
}

/// Drops placeholder payloads (`key`, `xxx`, ...) that appear in comments and examples.
pub fn remove_placeholders(keys: &mut BTreeSet<String>, placeholders: &[String]) {
    for placeholder in placeholders {
        keys.remove(placeholder);
    }
}
