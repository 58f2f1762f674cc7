use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Name of git's metadata directory inside a working tree.
pub const METADATA_DIR: &str = ".git";

/// Clone a repository into `target_dir`.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
///
/// `target_dir` must not exist or must be an empty directory.
pub fn clone(git: &str, url: &str, target_dir: &Path) -> Result<()> {
    log::debug!("running {} clone {} {}", git, url, target_dir.display());

    let output = Command::new(git)
        .args(["clone", url])
        .arg(target_dir)
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ToolNotFound {
                tool: git.to_string(),
            },
            _ => Error::GitClone {
                url: url.to_string(),
                message: e.to_string(),
                hint: None,
            },
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // Provide helpful error message for common auth failures
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Make sure you have access to the repository. For private repos, ensure \
                 your SSH key is added to ssh-agent or your git credentials are configured"
                    .to_string(),
            )
        } else {
            None
        };

        let message = if stderr.is_empty() {
            format!("git exited with {}", output.status)
        } else {
            stderr
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message,
            hint,
        });
    }

    Ok(())
}

/// Remove the `.git` directory from a cloned working tree.
///
/// Returns whether anything was removed.
pub fn strip_metadata(dir: &Path) -> Result<bool> {
    let metadata_dir = dir.join(METADATA_DIR);
    match fs::symlink_metadata(&metadata_dir) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(&metadata_dir)?;
            Ok(true)
        }
        // `.git` is a file for worktrees and submodules
        Ok(_) => {
            fs::remove_file(&metadata_dir)?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
