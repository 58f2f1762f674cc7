//! # Template Scaffolding
//!
//! The fetch and install steps behind `zjlab create --template <name>`.
//!
//! ## Fetch
//!
//! The template is cloned into a staging directory created beside the
//! resolved target (so `.` stages in the parent directory), its `.git`
//! directory is removed, and only then is the target touched:
//!
//! - [`WriteMode::Create`]: the staged tree is renamed into place. The target
//!   must not exist.
//! - [`WriteMode::Overwrite`]: the existing target is removed, then the staged
//!   tree is renamed into place. Refused when the target is the working
//!   directory or one of its ancestors.
//! - [`WriteMode::Merge`]: staged files are copied over the existing target,
//!   replacing files with the same path and leaving the rest alone.
//!
//! A failed clone drops the staging directory and leaves the target exactly
//! as it was.
//!
//! ## Install
//!
//! The manifest's `name` is set to the target directory's name, then the
//! chosen package manager installs dependencies with the target as its
//! working directory. A failed install leaves the fetched files in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Toolchain;
use crate::error::{Error, Result};
use crate::git;
use crate::manifest;
use crate::package_manager::{self, PackageManager};

/// What to do about an existing target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Overwrite,
    Merge,
}

/// Options for the install step.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Package manager to use instead of detecting one.
    pub package_manager: Option<PackageManager>,
    /// npm registry URL.
    pub registry: Option<String>,
}

/// Outcome of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    /// The name written into the manifest.
    pub name: String,
    pub package_manager: PackageManager,
}

/// Clone `url` into `target` and strip its git metadata.
pub fn fetch(toolchain: &Toolchain, url: &str, target: &Path, mode: WriteMode) -> Result<()> {
    if mode == WriteMode::Create && target.exists() {
        return Err(Error::TargetExists {
            path: target.to_path_buf(),
        });
    }

    let resolved = resolve_target(target)?;
    if mode == WriteMode::Overwrite && contains_working_dir(&resolved)? {
        return Err(Error::OverwriteWorkingDir {
            path: target.to_path_buf(),
        });
    }

    // Staging always sits beside the resolved target, never inside it
    let parent = resolved.parent().ok_or_else(|| {
        Error::Io(io::Error::other(format!(
            "no directory to stage a template beside {}",
            resolved.display()
        )))
    })?;
    fs::create_dir_all(parent)?;

    let staging = tempfile::Builder::new()
        .prefix(".zjlab-")
        .tempdir_in(parent)?;
    let checkout = staging.path().join("template");

    git::clone(&toolchain.git, url, &checkout)?;
    if git::strip_metadata(&checkout)? {
        log::debug!("removed git metadata from {}", checkout.display());
    }

    match mode {
        WriteMode::Create => fs::rename(&checkout, &resolved)?,
        WriteMode::Overwrite => {
            remove_existing(&resolved)?;
            fs::rename(&checkout, &resolved)?;
        }
        WriteMode::Merge if !resolved.exists() => fs::rename(&checkout, &resolved)?,
        WriteMode::Merge => merge_into(&checkout, &resolved)?,
    }

    Ok(())
}

/// Make `target` absolute with its parent's symlinks resolved.
///
/// The last component is kept as written so that a symlinked target is
/// replaced rather than followed. Paths ending in `..` are canonicalized.
fn resolve_target(target: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(target)?;
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => Ok(fs::canonicalize(parent)?.join(name)),
        (Some(_), Some(_)) => Ok(absolute),
        _ => Ok(fs::canonicalize(&absolute)?),
    }
}

/// Whether `target` is the working directory or one of its ancestors.
///
/// Such a target can only be merged into.
pub fn is_working_dir(target: &Path) -> Result<bool> {
    contains_working_dir(&resolve_target(target)?)
}

fn contains_working_dir(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    let cwd = fs::canonicalize(std::env::current_dir()?)?;
    Ok(cwd.starts_with(dir))
}

fn remove_existing(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Copy every file under `src` to the same relative path under `dest`.
///
/// Symlinks are recreated, not followed.
fn merge_into(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => Error::Io(io),
            None => Error::Io(io::Error::other("filesystem loop while merging")),
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::Io(io::Error::other(e.to_string())))?;
        let destination = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&destination)?;
            continue;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        log::trace!("merging {}", relative.display());
        let copied = if file_type.is_symlink() {
            copy_link(entry.path(), &destination)
        } else {
            fs::copy(entry.path(), &destination).map(|_| ())
        };
        copied.map_err(|e| {
            log::warn!("merge stopped at {}; earlier files were already written", relative.display());
            Error::Io(io::Error::new(e.kind(), format!("{}: {}", relative.display(), e)))
        })?;
    }
    Ok(())
}

fn copy_link(src: &Path, destination: &Path) -> io::Result<()> {
    match fs::symlink_metadata(destination) {
        Ok(meta) if meta.is_dir() => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a directory already exists at the link's path",
            ));
        }
        Ok(_) => fs::remove_file(destination)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(fs::read_link(src)?, destination)
    }
    #[cfg(not(unix))]
    {
        fs::copy(src, destination).map(|_| ())
    }
}

/// Rewrite the manifest name and install dependencies in `target`.
pub fn install(toolchain: &Toolchain, target: &Path, options: &InstallOptions) -> Result<Installed> {
    let name = manifest::rewrite_name(target)?;
    let manager = PackageManager::resolve(options.package_manager, toolchain)?;

    package_manager::install(toolchain, manager, target, options.registry.as_deref())?;

    Ok(Installed {
        name,
        package_manager: manager,
    })
}
