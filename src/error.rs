//! # Error Handling
//!
//! This module defines the centralized error type for the `zjlab` library.
//! It uses `thiserror` to build a single `Error` enum that covers every
//! failure the scaffolding flow can hit, with enough context in each variant
//! to print a useful message.
//!
//! The two errors a user will actually see most are [`Error::GitClone`] and
//! [`Error::Install`]: the clone of a remote template failed, or the package
//! manager install inside the new project failed. Everything else is
//! configuration, environment, or I/O trouble.
//!
//! The [`Result`] alias is used throughout the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for zjlab operations
#[derive(Error, Debug)]
pub enum Error {
    /// Cloning a template repository failed.
    ///
    /// Includes the repository URL, the git error output, and an optional
    /// hint for resolution.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// Installing dependencies in the generated project failed.
    #[error("Dependency install failed ({manager}): {message}")]
    Install { manager: String, message: String },

    /// The project manifest could not be read or rewritten.
    #[error("Manifest error at {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// A template identifier could not be resolved to a clone URL.
    #[error("Unknown template '{template}'. Available templates: {}", available.join(", "))]
    UnknownTemplate {
        template: String,
        available: Vec<String>,
    },

    /// The target directory exists and no overwrite/merge was requested.
    #[error("Target directory {} already exists", path.display())]
    TargetExists { path: PathBuf },

    /// Overwrite was requested for the working directory or one of its ancestors.
    #[error("Refusing to overwrite {}: it contains the current working directory", path.display())]
    OverwriteWorkingDir { path: PathBuf },

    /// A required external program is not installed.
    #[error("Required tool '{tool}' was not found on PATH")]
    ToolNotFound { tool: String },

    /// The installed Node.js does not satisfy the required version.
    #[error("You are using Node {found}, but this command requires Node {required}")]
    UnsupportedNode { found: String, required: String },

    /// A delegated framework command exited unsuccessfully.
    #[error("'{command}' exited with {}", code.map(|c| format!("status {}", c)).unwrap_or_else(|| "a signal".to_string()))]
    Delegate { command: String, code: Option<i32> },

    /// The configuration file is invalid.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The user backed out of an interactive choice.
    #[error("Operation cancelled")]
    Cancelled,

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A semantic versioning parsing error, wrapped from `semver::Error`.
    #[error("Semver parsing error: {0}")]
    Semver(#[from] semver::Error),

    /// A terminal prompt failed, wrapped from `dialoguer::Error`.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
