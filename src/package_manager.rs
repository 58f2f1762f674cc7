//! Package manager detection and dependency installation.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::config::Toolchain;
use crate::error::{Error, Result};

/// A Node.js package manager zjlab can install dependencies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Yarn,
    Npm,
    Pnpm,
}

/// Detection order: yarn is preferred, npm is the fallback.
const DETECTION_ORDER: &[PackageManager] = &[PackageManager::Yarn, PackageManager::Npm];

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// The program run for this manager.
    pub fn program<'a>(&self, toolchain: &'a Toolchain) -> &'a str {
        match self {
            PackageManager::Yarn => &toolchain.yarn,
            PackageManager::Npm => &toolchain.npm,
            PackageManager::Pnpm => &toolchain.pnpm,
        }
    }

    /// Whether the manager's program can be found.
    pub fn is_available(&self, toolchain: &Toolchain) -> bool {
        which::which(self.program(toolchain)).is_ok()
    }

    /// The first available manager in detection order.
    pub fn detect(toolchain: &Toolchain) -> Result<Self> {
        DETECTION_ORDER
            .iter()
            .copied()
            .find(|manager| manager.is_available(toolchain))
            .ok_or_else(|| Error::ToolNotFound {
                tool: "yarn or npm".to_string(),
            })
    }

    /// `preferred` when given, otherwise whatever is detected.
    pub fn resolve(preferred: Option<Self>, toolchain: &Toolchain) -> Result<Self> {
        match preferred {
            Some(manager) => Ok(manager),
            None => Self::detect(toolchain),
        }
    }

    /// The command a user runs to start `script`.
    pub fn run_script_hint(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            other => format!("{} {}", other.as_str(), script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run `<manager> install` inside `dir`, blocking until it exits.
///
/// The child inherits the terminal so the user sees its progress.
pub fn install(
    toolchain: &Toolchain,
    manager: PackageManager,
    dir: &Path,
    registry: Option<&str>,
) -> Result<()> {
    let program = manager.program(toolchain);

    let mut command = Command::new(program);
    command.arg("install").current_dir(dir);

    if let Some(registry) = registry {
        match manager {
            PackageManager::Npm | PackageManager::Pnpm => {
                command.arg(format!("--registry={}", registry));
            }
            PackageManager::Yarn => {
                log::warn!("--registry is only passed to npm and pnpm; ignoring it for yarn");
            }
        }
    }

    log::debug!("running {:?} in {}", command, dir.display());

    let status = command.status().map_err(|e| Error::Install {
        manager: manager.to_string(),
        message: match e.kind() {
            io::ErrorKind::NotFound => format!("'{}' was not found on PATH", program),
            _ => e.to_string(),
        },
    })?;

    if !status.success() {
        return Err(Error::Install {
            manager: manager.to_string(),
            message: format!("'{} install' exited with {}", program, status),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn missing_toolchain() -> Toolchain {
        Toolchain {
            yarn: "zjlab-no-such-yarn".to_string(),
            npm: "zjlab-no-such-npm".to_string(),
            pnpm: "zjlab-no-such-pnpm".to_string(),
            ..Toolchain::default()
        }
    }

    #[test]
    fn test_resolve_prefers_explicit_choice() {
        let toolchain = missing_toolchain();
        assert_eq!(
            PackageManager::resolve(Some(PackageManager::Pnpm), &toolchain).unwrap(),
            PackageManager::Pnpm
        );
    }

    #[test]
    fn test_detect_with_nothing_installed() {
        let toolchain = missing_toolchain();
        let result = PackageManager::detect(&toolchain);
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }

    #[test]
    fn test_install_missing_program() {
        let temp_dir = TempDir::new().unwrap();
        let toolchain = missing_toolchain();
        let err = install(&toolchain, PackageManager::Npm, temp_dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::Install { ref manager, .. } if manager == "npm"));
        assert!(err.to_string().contains("zjlab-no-such-npm"));
    }

    #[test]
    fn test_run_script_hint() {
        assert_eq!(PackageManager::Yarn.run_script_hint("serve"), "yarn serve");
        assert_eq!(PackageManager::Npm.run_script_hint("dev"), "npm run dev");
        assert_eq!(PackageManager::Pnpm.run_script_hint("dev"), "pnpm dev");
    }

    #[test]
    fn test_serde_lowercase() {
        let manager: PackageManager = serde_yaml::from_str("yarn").unwrap();
        assert_eq!(manager, PackageManager::Yarn);
        assert_eq!(serde_yaml::to_string(&PackageManager::Pnpm).unwrap().trim(), "pnpm");
    }

    #[cfg(unix)]
    mod scripted {
        use super::*;
        use serial_test::serial;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        fn script(dir: &Path, name: &str, body: &str) -> String {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        #[test]
        #[serial]
        fn test_detect_prefers_yarn() {
            let bin = TempDir::new().unwrap();
            let toolchain = Toolchain {
                yarn: script(bin.path(), "yarn", "exit 0"),
                npm: script(bin.path(), "npm", "exit 0"),
                ..Toolchain::default()
            };
            assert_eq!(PackageManager::detect(&toolchain).unwrap(), PackageManager::Yarn);
        }

        #[test]
        #[serial]
        fn test_detect_falls_back_to_npm() {
            let bin = TempDir::new().unwrap();
            let toolchain = Toolchain {
                yarn: "zjlab-no-such-yarn".to_string(),
                npm: script(bin.path(), "npm", "exit 0"),
                ..Toolchain::default()
            };
            assert_eq!(PackageManager::detect(&toolchain).unwrap(), PackageManager::Npm);
        }

        #[test]
        #[serial]
        fn test_install_runs_in_project_directory() {
            let bin = TempDir::new().unwrap();
            let project = TempDir::new().unwrap();
            let toolchain = Toolchain {
                npm: script(bin.path(), "npm", "pwd > installed.txt; echo \"$@\" >> installed.txt"),
                ..Toolchain::default()
            };

            install(
                &toolchain,
                PackageManager::Npm,
                project.path(),
                Some("https://registry.example.com"),
            )
            .unwrap();

            let log = fs::read_to_string(project.path().join("installed.txt")).unwrap();
            assert!(log.contains("install --registry=https://registry.example.com"));
        }

        #[test]
        #[serial]
        fn test_install_failure_is_reported() {
            let bin = TempDir::new().unwrap();
            let project = TempDir::new().unwrap();
            let toolchain = Toolchain {
                yarn: script(bin.path(), "yarn", "exit 3"),
                ..Toolchain::default()
            };

            let err = install(&toolchain, PackageManager::Yarn, project.path(), None).unwrap_err();
            assert!(matches!(err, Error::Install { .. }));
            assert!(err.to_string().contains("exited with"));
        }
    }
}
