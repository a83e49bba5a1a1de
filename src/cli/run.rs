//! Dispatches a parsed command to its handler.
//!
//! Handlers print their own reports and return the exit status; an `Err`
//! means the command could not run at all.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        audit::audit, init::init, score::score, search::search, validate::validate, wiki::wiki,
    },
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Audit(cmd)) => audit(cmd),
        Some(Command::Score(cmd)) => score(cmd),
        Some(Command::Wiki(cmd)) => wiki(cmd),
        Some(Command::Validate(cmd)) => validate(cmd),
        Some(Command::Search(cmd)) => search(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
