// crates/policy-generator-cli/src/discovery.rs
// ============================================================================
// Module: Config Discovery
// Description: Expands CLI paths into generator config files.
// Purpose: Walk directories recursively in a deterministic order.
// Dependencies: std::fs
// ============================================================================

//! ## Overview
//! A path that is not a readable directory is returned as a config file and
//! left for the reader to reject. Directories are walked recursively with
//! entries sorted by file name; every regular file is a config candidate.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::render::CliError;
use crate::render::CliResult;

/// Expands a CLI path into the config files it refers to.
///
/// # Errors
///
/// Returns [`CliError`] when a directory entry cannot be read.
pub fn collect_config_paths(path: &Path) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_into(path, &mut files)?;
    Ok(files)
}

/// Appends the config files under `path` to `files`.
fn collect_into(path: &Path, files: &mut Vec<PathBuf>) -> CliResult<()> {
    let Ok(entries) = fs::read_dir(path) else {
        files.push(path.to_path_buf());
        return Ok(());
    };

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            CliError::new(format!("failed to read directory '{}': {err}", path.display()))
        })?;
        children.push(entry.path());
    }
    children.sort();

    for child in children {
        if child.is_dir() {
            collect_into(&child, files)?;
        } else {
            files.push(child);
        }
    }
    Ok(())
}
