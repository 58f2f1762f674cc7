//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance,
//! including color and emoji support based on terminal capabilities and
//! user preferences, plus the status lines and spinner the scaffolding
//! flow prints.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zjlab::output::{self, OutputConfig};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! config.apply();
//!
//! let spinner = output::spinner(&config, "Cloning...");
//! spinner.finish_and_clear();
//! output::success(&config, "clone the repo");
//! ```

use std::env;
use std::io::IsTerminal;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// # Behavior
    /// - `--color=always`: Force colors on (overrides NO_COLOR)
    /// - `--color=never`: Force colors off
    /// - `--color=auto`: Detect based on environment
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Make `console` styling follow this configuration on both streams.
    pub fn apply(&self) {
        console::set_colors_enabled(self.use_color);
        console::set_colors_enabled_stderr(self.use_color);
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the emoji. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Whether prompts can be shown: both stdin and stderr are terminals.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && console::Term::stderr().is_term()
}

/// Print a success message
pub fn success(config: &OutputConfig, msg: &str) {
    println!("{} {}", style(emoji(config, "✔", "[OK]")).green().bold(), msg);
}

/// Print an error message
pub fn error(config: &OutputConfig, msg: &str) {
    eprintln!("{} {}", style(emoji(config, "✖", "[FAIL]")).red().bold(), msg);
}

/// Print a warning message
pub fn warning(config: &OutputConfig, msg: &str) {
    eprintln!("{} {}", style(emoji(config, "⚠", "[WARN]")).yellow().bold(), msg);
}

/// Print an info message
pub fn info(config: &OutputConfig, msg: &str) {
    println!("{} {}", style(emoji(config, "ℹ", "[INFO]")).blue().bold(), msg);
}

/// Create a spinner
///
/// Spinners only draw on a terminal; callers print a status line after
/// finishing one so the outcome is visible in logs too.
pub fn spinner(config: &OutputConfig, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let template = if config.use_color {
        "{spinner:.cyan} {msg}"
    } else {
        "{spinner} {msg}"
    };
    if let Ok(progress_style) = ProgressStyle::with_template(template) {
        pb.set_style(progress_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_color_flag_is_case_insensitive() {
        assert!(!OutputConfig::from_env_and_flag("NEVER").use_color);
    }

    #[test]
    fn test_emoji_helper_with_color() {
        let config = OutputConfig::with_color();
        assert_eq!(emoji(&config, "✔", "[OK]"), "✔");
    }

    #[test]
    fn test_emoji_helper_without_color() {
        let config = OutputConfig::without_color();
        assert_eq!(emoji(&config, "✔", "[OK]"), "[OK]");
    }

    #[test]
    fn test_spinner_carries_message() {
        let pb = spinner(&OutputConfig::without_color(), "cloning");
        assert_eq!(pb.message(), "cloning");
        pb.finish_and_clear();
    }
}
