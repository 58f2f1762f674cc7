//! # Info Command Implementation
//!
//! This module implements the `info` subcommand, which prints the operating
//! system, the versions and locations of the tools zjlab runs, and the
//! globally installed Vue CLI. Paste its output into bug reports.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use zjlab::envinfo::Report;

use super::Context;

/// Print debugging information about your environment
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

/// Execute the `info` command.
pub fn execute(_args: InfoArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?;

    println!("{}", console::style("Environment Info:").bold());
    let report = Report::collect(&config.commands);
    print!("{}", report);

    Ok(())
}
