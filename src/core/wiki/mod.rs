//! Flattens a multi-module Markdown tree into a GitHub wiki.

pub mod discover;
pub mod generate;
pub mod index;
pub mod links;
pub mod pages;
pub mod rewrite;
pub mod validate;

pub use discover::{DocModule, discover_modules};
pub use generate::{WikiBuild, WrittenPage, clean_wiki, generate_wiki};
pub use index::GlobalLinkIndex;
pub use rewrite::LinkRewriter;
pub use validate::{BrokenLink, ValidationReport, validate_wiki};
