//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zjlab::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Target directory {} already exists", path.display());
//!
//! // Use:
//! return Err(suggestions::target_exists(path));
//! ```

use std::path::Path;

/// Generate an error for a target directory that already exists.
///
/// Includes hints about the overwrite and merge flags.
pub fn target_exists(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Target directory {path} already exists\n\n\
         hint: Use -f/--force to overwrite it\n\
         hint: Use --merge to copy the template over the existing files",
        path = path.display()
    )
}

/// Generate an error for an overwrite that would delete the working directory.
pub fn overwrite_working_dir(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Refusing to overwrite {path}: it contains the current working directory\n\n\
         hint: Use --merge to generate the project in place",
        path = path.display()
    )
}

/// Generate an error for a template identifier that is not known.
///
/// Suggests the closest known template when one is near enough.
pub fn unknown_template(template: &str, available: &[String]) -> anyhow::Error {
    let candidates: Vec<&str> = available.iter().map(String::as_str).collect();
    let did_you_mean = find_similar(template, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "the {template} is not one of [{list}], please set correct template{did_you_mean}\n\n\
         hint: Run 'zjlab templates' to list available templates\n\
         hint: Add your own under 'templates:' in the zjlab config file",
        list = available.join(",")
    )
}

/// Generate an error for an unrecognised subcommand.
///
/// Suggests the closest known command when one is near enough.
pub fn unknown_command(command: &str, available: &[&str]) -> anyhow::Error {
    let did_you_mean = closest_command(command, available)
        .map(|s| format!("\nDid you mean {s}?"))
        .unwrap_or_default();

    anyhow::anyhow!("Unknown command {command}.{did_you_mean}")
}

/// Generate an error for a missing external tool.
pub fn tool_not_found(tool: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Required tool '{tool}' was not found on PATH\n\n\
         hint: Install it, or point zjlab at it under 'commands:' in the config file\n\
         hint: Run 'zjlab info' to see which tools were found"
    )
}

/// The closest command to `input`, if any is within an edit distance of 2.
pub fn closest_command<'a>(input: &str, available: &[&'a str]) -> Option<&'a str> {
    find_similar(input, available)
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single-row dynamic programming
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
