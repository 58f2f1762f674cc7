//! # Delegation to the Project-Generator Framework
//!
//! Most zjlab commands are handled by the Vue CLI. This module builds the
//! forwarded argument list and runs the framework binary with the terminal
//! attached, blocking until it exits. A non-zero exit becomes
//! [`Error::Delegate`].

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Toolchain;
use crate::error::{Error, Result};

/// A framework command line under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several positional arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append `--name` when `enabled`.
    pub fn flag(self, name: &str, enabled: bool) -> Self {
        if enabled {
            self.arg(format!("--{}", name))
        } else {
            self
        }
    }

    /// Append `--name value` when a value is present.
    pub fn option<S: AsRef<str>>(self, name: &str, value: Option<S>) -> Self {
        match value {
            Some(value) => self
                .arg(format!("--{}", name))
                .arg(value.as_ref().to_string()),
            None => self,
        }
    }

    /// Run the child in `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }

    /// The command line as a user would type it.
    pub fn display(&self) -> String {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command with inherited stdio and wait for it.
    pub fn run(&self) -> Result<()> {
        log::debug!("delegating to: {}", self.display());

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ToolNotFound {
                tool: self.program.to_string_lossy().into_owned(),
            },
            _ => Error::Io(e),
        })?;

        if !status.success() {
            return Err(Error::Delegate {
                command: self.display(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Start a `vue <subcommand>` invocation.
pub fn vue(toolchain: &Toolchain, subcommand: &str) -> Invocation {
    Invocation::new(&toolchain.vue).arg(subcommand)
}

/// The `vue-cli-service` for the project at `context`.
///
/// A project-local install under `node_modules/.bin` wins over the
/// configured program.
pub fn vue_cli_service(toolchain: &Toolchain, context: &Path) -> PathBuf {
    let bin = if cfg!(windows) {
        "vue-cli-service.cmd"
    } else {
        "vue-cli-service"
    };
    let local = context.join("node_modules").join(".bin").join(bin);
    if local.is_file() {
        local
    } else {
        PathBuf::from(&toolchain.vue_cli_service)
    }
}
