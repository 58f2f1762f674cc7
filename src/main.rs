//! # zjlab CLI
//!
//! This is the binary entry point for the `zjlab` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors: any error is printed to stderr
//!   and the process exits with status 1.
//!
//! The scaffolding logic lives in the `zjlab` library crate; the binary only
//! wires arguments, prompts and output around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
