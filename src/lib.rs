//! plugkit - maintenance tooling for a multi-plugin Minecraft server project
//!
//! Audits `<%key%>` template markers in plugin sources against their YAML
//! translation files, scores plugins against the LanguageKeys convention and
//! turns a multi-module Markdown docs tree into a flat GitHub wiki.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reports)
//! - `config`: `.plugkitrc.json` loading and defaults
//! - `core`: Key audit, pruning, compliance scoring, marker search and wiki generation
//! - `issues`: Non-fatal scan warnings
//! - `utils`: Shared path and text helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
