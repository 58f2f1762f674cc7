//! Shared test utilities for the end-to-end tests.
//!
//! The fixture owns a temporary directory holding a zjlab config file and,
//! on Unix, shell scripts standing in for `git`, `node`, `vue` and the
//! package managers. The config's `commands:` section points at those
//! scripts, so no real toolchain or network is needed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! #[serial]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_fake_tools();
//!     fixture.command().args(["create", "my-app", "-t", "node"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;
    #[allow(unused_imports)]
    pub use serial_test::serial;

    #[allow(unused_imports)]
    pub use super::scripts;
    pub use super::TestFixture;
}

/// Bodies for the scripted stand-ins. Each receives the same arguments the
/// real tool would.
#[allow(dead_code)]
pub mod scripts {
    /// `git clone <url> <dir>`: creates a small project with a `.git` directory.
    pub const GIT_CLONE_OK: &str = r#"
dir="$3"
mkdir -p "$dir/.git" "$dir/src"
echo "ref: refs/heads/main" > "$dir/.git/HEAD"
echo "console.log('hi')" > "$dir/src/index.js"
cat > "$dir/package.json" <<'EOF'
{
  "name": "create-node-api",
  "version": "1.0.0",
  "scripts": {
    "dev": "node src/index.js"
  }
}
EOF
echo "$2" > "$dir/.cloned-from"
"#;

    /// `git clone` that fails the way an unreachable remote does.
    pub const GIT_CLONE_FAIL: &str = r#"
echo "fatal: repository '$2' not found" >&2
exit 128
"#;

    /// Package manager that records its arguments in the project.
    pub const INSTALL_OK: &str = r#"
echo "$@" > install.log
"#;

    /// Package manager that fails.
    pub const INSTALL_FAIL: &str = r#"
echo "error An unexpected error occurred" >&2
exit 1
"#;

    /// A current Node.js.
    pub const NODE_CURRENT: &str = "echo v18.17.1\n";

    /// A Node.js too old for the framework.
    pub const NODE_OLD: &str = "echo v6.17.1\n";

    /// An end-of-life Node.js 9.
    pub const NODE_EOL: &str = "echo v9.11.2\n";
}

/// A test fixture that provides a temporary directory with a config file
/// and scripted tools.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    extra_config: String,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            extra_config: String::new(),
        };
        fixture.write_config();
        fixture
    }

    /// Install the default set of succeeding tools.
    #[cfg(unix)]
    pub fn with_fake_tools(self) -> Self {
        self.with_tool("git", scripts::GIT_CLONE_OK)
            .with_tool("node", scripts::NODE_CURRENT)
            .with_tool("yarn", scripts::INSTALL_OK)
            .with_tool("npm", scripts::INSTALL_OK)
            .with_tool("pnpm", scripts::INSTALL_OK)
            .with_tool("vue", &record_args("vue"))
            .with_tool("vue-cli-service", &record_args("vue-cli-service"))
    }

    /// Write (or replace) the script standing in for `name`.
    #[cfg(unix)]
    pub fn with_tool(self, name: &str, body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let path = self.tool_path(name);
        std::fs::create_dir_all(path.parent().expect("tool path has a parent"))
            .expect("Failed to create bin directory");
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("Failed to write tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make tool executable");
        self
    }

    /// Append YAML to the generated config file.
    pub fn with_config(mut self, yaml: &str) -> Self {
        self.extra_config.push_str(yaml);
        self.write_config();
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("zjlab.yaml")
    }

    /// Where the script for `name` lives.
    pub fn tool_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(".bin").join(name)
    }

    /// Arguments the recording `name` script last received, one per line.
    #[allow(dead_code)]
    pub fn recorded_args(&self, name: &str) -> Vec<String> {
        let log = self.temp_dir.path().join(format!("{}.args", name));
        std::fs::read_to_string(log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory with
    /// its config file.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("zjlab");
        cmd.current_dir(self.path())
            .env("ZJLAB_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("VUE_CLI_CONTEXT")
            .env_remove("RUST_LOG");
        cmd
    }

    fn write_config(&self) {
        let mut yaml = String::from("commands:\n");
        for (key, name) in [
            ("git", "git"),
            ("node", "node"),
            ("vue", "vue"),
            ("vue_cli_service", "vue-cli-service"),
            ("yarn", "yarn"),
            ("npm", "npm"),
            ("pnpm", "pnpm"),
        ] {
            yaml.push_str(&format!("  {}: {}\n", key, self.tool_path(name).display()));
        }
        yaml.push_str(&self.extra_config);

        std::fs::write(self.config_path(), yaml).expect("Failed to write config file");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Script body that records its arguments, one per line, next to the config.
#[cfg(unix)]
fn record_args(name: &str) -> String {
    format!(
        "dir=$(dirname \"$ZJLAB_CONFIG\")\nprintf '%s\\n' \"$@\" > \"$dir/{}.args\"\npwd > \"$dir/{}.cwd\"\n",
        name, name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_config() {
        let fixture = TestFixture::new().with_config("package_manager: yarn\n");
        let content = std::fs::read_to_string(fixture.config_path()).unwrap();
        assert!(content.starts_with("commands:\n"));
        assert!(content.contains("package_manager: yarn"));
    }

    #[test]
    fn test_fixture_config_is_valid_yaml() {
        let fixture = TestFixture::new();
        let content = std::fs::read_to_string(fixture.config_path()).unwrap();
        serde_yaml::from_str::<serde_yaml::Value>(&content).expect("Config should be valid YAML");
    }
}
