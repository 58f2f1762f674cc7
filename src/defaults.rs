//! Default values for zjlab configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the environment variable that points at a configuration file.
pub const CONFIG_ENV: &str = "ZJLAB_CONFIG";

/// Node.js version range required by the delegated framework commands.
pub const NODE_VERSION: &str = ">=8.9";

/// Node.js version range required by `zjlab ui`.
pub const UI_NODE_VERSION: &str = ">=8.6";

/// Template identifier that hands creation over to `vue create`.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Built-in template table: identifier and clone URL.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("node", "https://github.com/lidasong/create-node-api.git"),
    ("saber", "git@gitlab.zhejianglab.com:bladex/Saber.git"),
];

/// Returns the default configuration file path.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/zjlab/config.yaml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/zjlab/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\zjlab\config.yaml`
///
/// Falls back to `.zjlab/zjlab/config.yaml` under the current directory if
/// the platform configuration directory cannot be determined.
///
/// This can be overridden by the `--config` CLI flag or the `ZJLAB_CONFIG`
/// environment variable.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".zjlab"))
        .join("zjlab")
        .join("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_returns_path() {
        let path = default_config_path();
        assert!(path.ends_with("zjlab/config.yaml"));
    }

    #[test]
    fn test_builtin_templates_do_not_shadow_default() {
        assert!(BUILTIN_TEMPLATES
            .iter()
            .all(|(name, _)| *name != DEFAULT_TEMPLATE));
    }

    #[test]
    fn test_version_ranges_parse() {
        assert!(semver::VersionReq::parse(NODE_VERSION).is_ok());
        assert!(semver::VersionReq::parse(UI_NODE_VERSION).is_ok());
    }
}
