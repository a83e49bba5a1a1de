//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `audit`: Compare used template keys with translation files, optionally prune
//! - `score`: Score plugins against the LanguageKeys convention
//! - `wiki`: Generate the GitHub wiki from the docs tree
//! - `validate`: Check the links of a generated wiki
//! - `search`: List template markers under a directory
//! - `init`: Initialize plugkit configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "plugkit", author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Audit(cmd)) => cmd.common.verbose,
            Some(Command::Score(cmd)) => cmd.common.verbose,
            Some(Command::Wiki(cmd)) => cmd.common.verbose,
            Some(Command::Validate(cmd)) => cmd.common.verbose,
            Some(Command::Search(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; config and relative paths are resolved against it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AuditCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only audit these plugins
    #[arg(long, num_args = 1..)]
    pub plugins: Vec<String>,

    /// Delete redundant keys from translation files after the report
    #[arg(long)]
    pub prune: bool,

    /// Do not copy translation files to a timestamped backup before pruning
    #[arg(long, requires = "prune")]
    pub no_backup: bool,

    /// Prune without asking for confirmation
    #[arg(short, long, requires = "prune")]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ScoreCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only score these plugins
    #[arg(long, num_args = 1..)]
    pub plugins: Vec<String>,

    /// Minimum passing score (overrides config file)
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Args)]
pub struct WikiCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Documentation directory (overrides config file)
    #[arg(long)]
    pub docs: Option<PathBuf>,

    /// Wiki output directory, recreated on every run (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Do not check links after generating
    #[arg(long)]
    pub skip_validation: bool,

    /// Delete the wiki output directory instead of generating
    #[arg(long, conflicts_with_all = ["docs", "skip_validation"])]
    pub clean: bool,
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Wiki directory to check (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SearchCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory to search (overrides config file)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report missing and redundant translation keys per plugin and translation file
    Audit(AuditCommand),
    /// Score plugins against the LanguageKeys convention and fail below a threshold
    Score(ScoreCommand),
    /// Generate a flat GitHub wiki from the multi-module docs tree
    Wiki(WikiCommand),
    /// Report broken internal links in a generated wiki
    Validate(ValidateCommand),
    /// List <%key%> markers found under a directory
    Search(SearchCommand),
    /// Initialize a new .plugkitrc.json configuration file
    Init,
}
