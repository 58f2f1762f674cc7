//! # Serve and Build Commands
//!
//! `serve` and `build` run the project's `vue-cli-service` with the given
//! arguments. The project is the directory named by `VUE_CLI_CONTEXT`, or the
//! current directory when it is unset.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use zjlab::delegate::{self, Invocation};

use super::{run_framework, Context};

/// Environment variable naming the project directory.
pub const CONTEXT_ENV: &str = "VUE_CLI_CONTEXT";

/// Arguments forwarded to `vue-cli-service`
#[derive(Args, Debug, Default)]
pub struct ServiceArgs {
    /// Arguments for vue-cli-service, e.g. `--mode development --port 8081`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// The project directory `vue-cli-service` runs in.
fn project_context() -> Result<PathBuf> {
    match std::env::var_os(CONTEXT_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => std::env::current_dir().context("Failed to read the current directory"),
    }
}

fn service_invocation(
    program: PathBuf,
    context: PathBuf,
    command: &str,
    args: &ServiceArgs,
) -> Invocation {
    Invocation::new(program)
        .arg(command)
        .args(args.args.iter().cloned())
        .current_dir(context)
}

/// Execute `serve` or `build`.
pub fn execute(command: &str, args: ServiceArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let context = project_context()?;
    log::debug!("{} in {}", command, context.display());

    let program = delegate::vue_cli_service(&config.commands, &context);
    let invocation = service_invocation(program, context, command, &args);
    run_framework(ctx, &config, invocation, config.node_requirement())
}
