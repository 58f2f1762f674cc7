//! Reading and rewriting a generated project's `package.json`.
//!
//! Key order and every field other than `name` survive a rewrite.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Scripts tried, in order, when suggesting how to start a project.
const START_SCRIPTS: &[&str] = &["serve", "dev", "start"];

/// Path of the manifest inside `dir`.
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

/// The project name implied by `dir`: its final path component.
pub fn project_name(dir: &Path) -> Result<String> {
    let resolved;
    let name = match dir.file_name() {
        Some(name) => name,
        None => {
            // ".", "..", "foo/.." and the like
            resolved = fs::canonicalize(dir)?;
            resolved.file_name().ok_or_else(|| Error::Manifest {
                path: dir.to_path_buf(),
                message: "cannot derive a project name from this path".to_string(),
            })?
        }
    };

    name.to_str().map(str::to_string).ok_or_else(|| Error::Manifest {
        path: dir.to_path_buf(),
        message: "directory name is not valid UTF-8".to_string(),
    })
}

fn read(path: &Path) -> Result<serde_json::Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| Error::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::Manifest {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(Error::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Set the manifest's `name` field to the directory's name.
///
/// Returns the name written.
pub fn rewrite_name(dir: &Path) -> Result<String> {
    let name = project_name(dir)?;
    let path = manifest_path(dir);

    let mut manifest = read(&path)?;
    if let Some(previous) = manifest.get("name").and_then(Value::as_str) {
        log::debug!("renaming package '{}' to '{}'", previous, name);
    }
    manifest.insert("name".to_string(), Value::String(name.clone()));

    let mut content = serde_json::to_string_pretty(&Value::Object(manifest))?;
    content.push('\n');
    fs::write(&path, content)?;

    Ok(name)
}

/// The first of `serve`, `dev` or `start` the manifest defines, if any.
pub fn start_script(dir: &Path) -> Option<String> {
    let manifest = read(&manifest_path(dir)).ok()?;
    let scripts = manifest.get("scripts")?.as_object()?;
    START_SCRIPTS
        .iter()
        .find(|script| scripts.contains_key(**script))
        .map(|script| script.to_string())
}
