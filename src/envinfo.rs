//! Environment report printed by `zjlab info`.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::config::Toolchain;
use crate::node;

/// A program found (or not) on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub label: String,
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

impl Binary {
    /// Locate `program` and ask it for `--version`.
    pub fn probe(label: &str, program: &str) -> Self {
        let path = which::which(program).ok();
        let version = path.as_ref().and_then(|path| {
            let output = Command::new(path).arg("--version").output().ok()?;
            let text = if output.stdout.is_empty() {
                String::from_utf8_lossy(&output.stderr).into_owned()
            } else {
                String::from_utf8_lossy(&output.stdout).into_owned()
            };
            node::parse_version(&text)
                .map(|v| v.to_string())
                .or_else(|| text.lines().next().map(|l| l.trim().to_string()))
        });

        Self {
            label: label.to_string(),
            version,
            path,
        }
    }
}

/// Host operating system and CPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct System {
    pub os: String,
    pub arch: String,
    pub cpus: usize,
}

impl System {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// Everything `zjlab info` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub system: System,
    pub binaries: Vec<Binary>,
    pub global_packages: Vec<Binary>,
}

impl Report {
    pub fn collect(toolchain: &Toolchain) -> Self {
        Self {
            system: System::current(),
            binaries: vec![
                Binary::probe("Node", &toolchain.node),
                Binary::probe("Yarn", &toolchain.yarn),
                Binary::probe("npm", &toolchain.npm),
                Binary::probe("pnpm", &toolchain.pnpm),
                Binary::probe("Git", &toolchain.git),
            ],
            global_packages: vec![Binary::probe("@vue/cli", &toolchain.vue)],
        }
    }
}

fn write_binary(f: &mut fmt::Formatter<'_>, binary: &Binary) -> fmt::Result {
    match (&binary.version, &binary.path) {
        (Some(version), Some(path)) => {
            writeln!(f, "    {}: {} - {}", binary.label, version, path.display())
        }
        (None, Some(path)) => writeln!(f, "    {}: {}", binary.label, path.display()),
        _ => writeln!(f, "    {}: Not Found", binary.label),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  System:")?;
        writeln!(f, "    OS: {}", self.system.os)?;
        writeln!(f, "    CPU: ({}) {}", self.system.cpus, self.system.arch)?;
        writeln!(f, "  Binaries:")?;
        for binary in &self.binaries {
            write_binary(f, binary)?;
        }
        writeln!(f, "  npmGlobalPackages:")?;
        for package in &self.global_packages {
            write_binary(f, package)?;
        }
        Ok(())
    }
}
