//! # Node.js Version Checks
//!
//! The delegated framework commands run on Node.js, so before handing over
//! to them zjlab checks that the installed `node` satisfies the configured
//! version range. Pre-release builds are compared as if they were the
//! corresponding release, so `v16.0.0-nightly` satisfies `>=16`.

use std::io;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use semver::{Prerelease, Version, VersionReq};

use crate::error::{Error, Result};

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?)").unwrap());

/// Extract the first `major.minor.patch` version from tool output.
pub fn parse_version(text: &str) -> Option<Version> {
    VERSION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| Version::parse(m.as_str()).ok())
}

/// Ask `node` for its version.
pub fn installed_version(node: &str) -> Result<Version> {
    let output = Command::new(node)
        .arg("--version")
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ToolNotFound {
                tool: node.to_string(),
            },
            _ => Error::Io(e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_version(&stdout) {
        Some(version) => Ok(version),
        None => Ok(Version::parse(stdout.trim().trim_start_matches('v'))?),
    }
}

/// Whether `version` satisfies `required`, ignoring pre-release tags.
pub fn satisfies(version: &Version, required: &VersionReq) -> bool {
    let mut release = version.clone();
    release.pre = Prerelease::EMPTY;
    required.matches(&release)
}

/// Node.js 9.x reached end-of-life and is no longer supported upstream.
pub fn is_end_of_life(version: &Version) -> bool {
    version.major == 9
}

/// Check the installed Node.js against `required`.
///
/// Returns the installed version on success.
pub fn check(node: &str, required: &str) -> Result<Version> {
    let requirement = VersionReq::parse(required)?;
    let version = installed_version(node)?;

    if !satisfies(&version, &requirement) {
        return Err(Error::UnsupportedNode {
            found: format!("v{}", version),
            required: required.to_string(),
        });
    }

    log::debug!("node v{} satisfies {}", version, required);
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_variants() {
        assert_eq!(parse_version("v18.17.1\n"), Some(Version::new(18, 17, 1)));
        assert_eq!(parse_version("1.22.19"), Some(Version::new(1, 22, 19)));
        assert_eq!(
            parse_version("git version 2.39.2 (Apple Git-143)"),
            Some(Version::new(2, 39, 2))
        );
        assert_eq!(
            parse_version("v21.0.0-nightly2023"),
            Some(Version::parse("21.0.0-nightly2023").unwrap())
        );
        assert_eq!(parse_version("no version here"), None);
        assert_eq!(parse_version("v18"), None);
    }

    #[test]
    fn test_satisfies_ignores_prerelease() {
        let required = VersionReq::parse(">=16.0.0").unwrap();
        assert!(satisfies(&Version::parse("16.0.0-nightly").unwrap(), &required));
        assert!(satisfies(&Version::new(18, 0, 0), &required));
        assert!(!satisfies(&Version::new(14, 21, 3), &required));
    }

    #[test]
    fn test_default_requirement() {
        let required = VersionReq::parse(crate::defaults::NODE_VERSION).unwrap();
        assert!(satisfies(&Version::new(8, 9, 0), &required));
        assert!(!satisfies(&Version::new(8, 6, 0), &required));
    }

    #[test]
    fn test_is_end_of_life() {
        assert!(is_end_of_life(&Version::new(9, 11, 2)));
        assert!(!is_end_of_life(&Version::new(10, 0, 0)));
    }

    #[test]
    fn test_check_missing_node() {
        let result = check("zjlab-no-such-node", ">=8.9");
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }

    #[test]
    fn test_check_invalid_requirement() {
        let result = check("zjlab-no-such-node", "eight");
        assert!(matches!(result, Err(Error::Semver(_))));
    }
}
