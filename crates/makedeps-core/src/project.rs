//! Project-root discovery and verification.
//!
//! The tool only makes sense when run from the top of the source tree (all
//! configured paths are root-relative), but it conventionally ships in the
//! root's `scripts/` directory, so being started from there is tolerated by
//! ascending one level. Anywhere else is a fatal refusal.

use std::path::{Path, PathBuf};

use crate::config::DepsConfig;
use crate::error::{DepsError, Result};

/// Directory name the tool may be started from, one level under the root.
const SCRIPTS_DIR: &str = "scripts";

/// The directories `start` is allowed to stand for: itself, plus its parent
/// when `start` is the scripts directory.
pub(crate) fn candidate_roots(start: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![start.to_path_buf()];
    if start.file_name().is_some_and(|name| name == SCRIPTS_DIR) {
        if let Some(parent) = start.parent() {
            candidates.push(parent.to_path_buf());
        }
    }
    candidates
}

/// Whether `dir` is the project root: the first configured source directory
/// must exist beneath it.
pub fn is_project_root(dir: &Path, config: &DepsConfig) -> bool {
    match config.scan.source_dirs.first() {
        Some(landmark) => dir.join(landmark).is_dir(),
        None => false,
    }
}

/// Locate the project root starting from `start`.
///
/// Accepts `start` itself, or its parent when `start` is the scripts
/// directory the tool ships in. Anything else is an error.
pub fn find_project_root(start: &Path, config: &DepsConfig) -> Result<PathBuf> {
    for candidate in candidate_roots(start) {
        if is_project_root(&candidate, config) {
            return Ok(candidate);
        }
    }
    Err(DepsError::WrongDirectory {
        landmark: config
            .scan
            .source_dirs
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("src")),
    })
}

/// Change the process working directory to the project root found from the
/// current directory, and return it.
///
/// This is the command-line entry point's version of the check; library
/// callers pass an explicit root around instead of touching the process
/// state.
pub fn enter_project_root(config: &DepsConfig) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let root = find_project_root(&cwd, config)?;
    if root != cwd {
        std::env::set_current_dir(&root)?;
    }
    Ok(root)
}
