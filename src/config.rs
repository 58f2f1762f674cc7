//! # Configuration
//!
//! This module defines the optional `config.yaml` file that customises the
//! template table and the external programs `zjlab` runs, together with the
//! logic for locating, parsing and validating it.
//!
//! ## Key Components
//!
//! - **`Config`**: The whole file. Every field is optional; an empty or missing
//!   file yields `Config::default()`.
//!
//! - **`Toolchain`**: The `commands:` section, naming the programs used for
//!   git, Node.js, the Vue CLI and each package manager. Tests point these at
//!   scripted stand-ins.
//!
//! ## Example
//!
//! ```yaml
//! templates:
//!   admin: https://github.com/example/admin-template.git
//! url_pattern: "https://github.com/zjlab-templates/{template}.git"
//! package_manager: yarn
//! node_version: ">=8.9"
//! commands:
//!   git: /usr/local/bin/git
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::package_manager::PackageManager;
use crate::template;

/// Names of the external programs zjlab invokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Toolchain {
    pub git: String,
    pub node: String,
    pub vue: String,
    pub vue_cli_service: String,
    pub yarn: String,
    pub npm: String,
    pub pnpm: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            node: "node".to_string(),
            vue: node_shim("vue"),
            vue_cli_service: node_shim("vue-cli-service"),
            yarn: node_shim("yarn"),
            npm: node_shim("npm"),
            pnpm: node_shim("pnpm"),
        }
    }
}

/// npm-installed executables are `.cmd` shims on Windows.
fn node_shim(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.cmd", name)
    } else {
        name.to_string()
    }
}

/// Parsed contents of the zjlab configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extra template identifiers and their clone URLs. Entries here replace
    /// built-in entries with the same name.
    pub templates: BTreeMap<String, String>,

    /// URL used for identifiers missing from the table, with `{template}`
    /// standing in for the identifier.
    pub url_pattern: Option<String>,

    /// Package manager to install with instead of detecting one.
    pub package_manager: Option<PackageManager>,

    /// npm registry passed to installs.
    pub registry: Option<String>,

    /// Node.js version range required by delegated framework commands.
    pub node_version: Option<String>,

    /// External program names.
    pub commands: Toolchain,
}

impl Config {
    /// The Node.js requirement for delegated commands.
    pub fn node_requirement(&self) -> &str {
        self.node_version
            .as_deref()
            .unwrap_or(defaults::NODE_VERSION)
    }

    /// Check the semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in &self.templates {
            if name == defaults::DEFAULT_TEMPLATE {
                return Err(Error::ConfigParse {
                    message: format!("template name '{}' is reserved", name),
                    hint: Some("Pick another name for this template".to_string()),
                });
            }
            if !template::is_valid_name(name) {
                return Err(Error::ConfigParse {
                    message: format!("invalid template name '{}'", name),
                    hint: Some(
                        "Use letters, digits, '.', '_' or '-', starting with a letter or digit"
                            .to_string(),
                    ),
                });
            }
            if !template::is_valid_clone_url(url) {
                return Err(Error::ConfigParse {
                    message: format!("template '{}' has an invalid URL: {}", name, url),
                    hint: Some(
                        "Use an https://, ssh://, git:// or file:// URL, or user@host:path"
                            .to_string(),
                    ),
                });
            }
        }

        if let Some(pattern) = &self.url_pattern {
            if !pattern.contains(template::PATTERN_PLACEHOLDER) {
                return Err(Error::ConfigParse {
                    message: format!("url_pattern '{}' has no placeholder", pattern),
                    hint: Some(format!(
                        "Add {} where the template name belongs",
                        template::PATTERN_PLACEHOLDER
                    )),
                });
            }
        }

        if let Some(registry) = &self.registry {
            match url::Url::parse(registry) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => {
                    return Err(Error::ConfigParse {
                        message: format!("registry '{}' is not an http(s) URL", registry),
                        hint: None,
                    })
                }
            }
        }

        semver::VersionReq::parse(self.node_requirement())?;

        Ok(())
    }
}

/// Parse and validate a YAML configuration string.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }

    // A document holding only comments parses as null
    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;
    if value.is_null() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_value(value)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load configuration from `path` when given, otherwise from the default
/// location. A missing default file yields the default configuration.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => from_file(path),
        None => {
            let default_path = defaults::default_config_path();
            if default_path.is_file() {
                log::debug!("loading configuration from {}", default_path.display());
                from_file(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
