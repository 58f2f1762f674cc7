//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `zjlab`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`Context`] and performs the command's logic.
//!
//! Commands that the Vue CLI implements live together in [`framework`]; they
//! only translate their arguments back into a `vue` command line.

pub mod completions;
pub mod create;
pub mod framework;
pub mod info;
pub mod service;
pub mod templates;
pub mod unknown;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use zjlab::config::{self, Config};
use zjlab::delegate::Invocation;
use zjlab::error::Error;
use zjlab::node;
use zjlab::output::{self, OutputConfig};
use zjlab::suggestions;

/// State shared by every command: output preferences and where the
/// configuration file lives.
#[derive(Debug, Clone)]
pub struct Context {
    pub output: OutputConfig,
    config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(output: OutputConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            output,
            config_path,
        }
    }

    /// Load the configuration file, or the defaults when there is none.
    pub fn config(&self) -> Result<Config> {
        config::load(self.config_path.as_deref()).with_context(|| match &self.config_path {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load the default config file".to_string(),
        })
    }
}

/// Turn a library error into a user-facing one, adding hints where the
/// library error has an obvious fix.
pub fn explain(err: Error) -> anyhow::Error {
    match err {
        Error::ToolNotFound { tool } => suggestions::tool_not_found(&tool),
        Error::TargetExists { path } => suggestions::target_exists(&path),
        Error::OverwriteWorkingDir { path } => suggestions::overwrite_working_dir(&path),
        Error::UnknownTemplate {
            template,
            available,
        } => suggestions::unknown_template(&template, &available),
        other => anyhow::Error::new(other),
    }
}

/// Check Node.js against `required`, warning about end-of-life releases.
pub fn check_node(ctx: &Context, config: &Config, required: &str) -> Result<()> {
    let version = node::check(&config.commands.node, required).map_err(explain)?;

    if node::is_end_of_life(&version) {
        output::warning(
            &ctx.output,
            &format!(
                "You are using Node v{}. Node.js 9.x has already reached end-of-life and will \
                 not be supported in future major releases. It's strongly recommended to use \
                 an active LTS version instead.",
                version
            ),
        );
    }

    Ok(())
}

/// Run a framework command line after the Node.js check.
pub fn run_framework(
    ctx: &Context,
    config: &Config,
    invocation: Invocation,
    required_node: &str,
) -> Result<()> {
    check_node(ctx, config, required_node)?;
    invocation.run().map_err(explain)
}
