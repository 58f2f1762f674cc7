//! Integration tests that run the real `git`.
//!
//! These tests are disabled by default since they need git on PATH, and one
//! of them needs network access. To run them:
//!
//! ```bash
//! # Run all tests including integration tests
//! cargo test --features integration-tests
//!
//! # Skip network tests even when integration-tests feature is enabled
//! SKIP_NETWORK_TESTS=1 cargo test --features integration-tests
//! ```
//!
//! The package managers are still scripted stand-ins.

#![cfg(unix)]

#[allow(dead_code)]
mod common;
use common::prelude::*;

use std::env;
use std::path::Path;
use std::process::Command;

const REAL_GIT: &str = "exec git \"$@\"\n";

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=zjlab", "-c", "user.email=zjlab@example.com"])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git should run");
    assert!(status.success(), "git {:?} failed", args);
}

/// Create a template repository with one commit.
fn template_repo(root: &Path) -> std::path::PathBuf {
    let repo = root.join("template-src");
    std::fs::create_dir_all(repo.join("src")).unwrap();
    std::fs::write(
        repo.join("package.json"),
        "{\n  \"name\": \"template\",\n  \"private\": true,\n  \"scripts\": { \"serve\": \"vue-cli-service serve\" }\n}\n",
    )
    .unwrap();
    std::fs::write(repo.join("src/main.js"), "export default {}\n").unwrap();

    git(&repo, &["init", "--quiet"]);
    git(&repo, &["add", "."]);
    git(&repo, &["commit", "--quiet", "-m", "template"]);
    repo
}

#[test]
#[serial]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_create_from_local_git_template() {
    let fixture = TestFixture::new().with_fake_tools().with_tool("git", REAL_GIT);
    let repo = template_repo(fixture.path());
    let fixture = fixture.with_config(&format!(
        "templates:\n  local: \"file://{}\"\n",
        repo.display()
    ));

    fixture
        .command()
        .args(["create", "web-app", "-t", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ yarn serve"));

    let app = fixture.child("web-app");
    app.child(".git").assert(predicate::path::missing());
    app.child("src/main.js").assert(predicate::path::exists());
    app.child("package.json")
        .assert(predicate::str::contains("\"name\": \"web-app\""));
    app.child("install.log").assert(predicate::path::exists());

    // Key order survives the rename
    let manifest = std::fs::read_to_string(app.child("package.json").path()).unwrap();
    let name_at = manifest.find("\"name\"").unwrap();
    let private_at = manifest.find("\"private\"").unwrap();
    assert!(name_at < private_at);
}

#[test]
#[serial]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_create_from_missing_local_repository() {
    let fixture = TestFixture::new().with_fake_tools().with_tool("git", REAL_GIT);
    let missing = fixture.path().join("no-such-repo");
    let fixture = fixture.with_config(&format!(
        "templates:\n  gone: \"file://{}\"\n",
        missing.display()
    ));

    fixture
        .command()
        .args(["create", "web-app", "-t", "gone"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Git clone error"));

    fixture.child("web-app").assert(predicate::path::missing());
}

/// Clones the real `node` template from GitHub.
#[test]
#[serial]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_create_from_builtin_node_template() {
    if env::var("SKIP_NETWORK_TESTS").is_ok() {
        println!("Skipping network integration test");
        return;
    }

    let fixture = TestFixture::new().with_fake_tools().with_tool("git", REAL_GIT);

    fixture
        .command()
        .args(["create", "node-api", "-t", "node"])
        .assert()
        .success();

    let app = fixture.child("node-api");
    app.child(".git").assert(predicate::path::missing());
    app.child("package.json")
        .assert(predicate::str::contains("\"name\": \"node-api\""));
}
