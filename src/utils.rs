//! Common utility functions shared across the codebase.

/// Lexically normalizes a `/`-separated relative path.
///
/// Collapses `.` segments, empty segments and `name/..` pairs. Leading `..`
/// segments that cannot be collapsed are kept, so a path escaping its base
/// stays recognizable. An empty result becomes `"."`.
///
/// # Examples
///
/// ```
/// use plugkit::utils::normalize_path;
///
/// assert_eq!(normalize_path("api/../core/README.md"), "core/README.md");
/// assert_eq!(normalize_path("./guides//intro.md"), "guides/intro.md");
/// assert_eq!(normalize_path("../../core/README.md"), "../../core/README.md");
/// assert_eq!(normalize_path("a/.."), ".");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Joins `target` onto the directory part of `current` and normalizes the result.
///
/// `current` is a file path (`api/pages.md`), so its last segment is dropped first.
pub fn join_relative(current: &str, target: &str) -> String {
    match current.rsplit_once('/') {
        Some((dir, _)) => normalize_path(&format!("{}/{}", dir, target)),
        None => normalize_path(target),
    }
}

/// Uppercases the first letter of every word, lowercases the rest.
///
/// A word starts after any non-alphabetic character, so `01-first-gui`
/// becomes `01-First-Gui`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Returns `singular` when `count == 1`, otherwise `plural`.
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
