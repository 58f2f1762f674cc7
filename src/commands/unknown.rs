//! Handling for subcommands zjlab does not know.
//!
//! The help is printed first, followed by `Unknown command <x>.` and the
//! closest known command, if any.

use anyhow::Result;
use clap::CommandFactory;

use zjlab::suggestions;

use crate::cli::Cli;

/// Names of every visible subcommand.
pub fn command_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .filter(|sub| !sub.is_hide_set())
        .map(|sub| sub.get_name().to_string())
        .collect()
}

/// Report `args[0]` as an unknown command.
pub fn execute(args: Vec<String>) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or_default();
    log::debug!("unknown command line: {:?}", args);

    Cli::command().print_help()?;
    println!();

    let names = command_names();
    let candidates: Vec<&str> = names.iter().map(String::as_str).collect();
    Err(suggestions::unknown_command(command, &candidates))
}
