//! Scan configuration (makedeps.toml format).
//!
//! Every field carries a built-in default, so the tool runs with no config
//! file at all; a `makedeps.toml` at the project root overrides the parts it
//! names and inherits the rest.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DepsError, Result};
use crate::project;

/// File name probed for at the project root when no explicit path is given.
pub const CONFIG_FILE: &str = "makedeps.toml";

/// Root configuration for a dependency-update run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepsConfig {
    /// What to scan and where includes resolve.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Where and how the fragment is written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Ordered object-directory rules; the first matching prefix wins, so
    /// more specific prefixes belong earlier.
    #[serde(rename = "object_dir", default = "default_object_dirs")]
    pub object_dirs: Vec<ObjectDirRule>,
}

/// Source enumeration and include-resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directories holding compilable sources, scanned non-recursively.
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<PathBuf>,

    /// Extra include roots (third-party headers) searched after the source
    /// directories.
    #[serde(default = "default_include_dirs")]
    pub include_dirs: Vec<PathBuf>,

    /// fnmatch-style pattern selecting compilable sources by file name.
    #[serde(default = "default_source_pattern")]
    pub source_pattern: String,
}

/// Fragment output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the generated fragment, relative to the project root.
    #[serde(default = "default_makefile")]
    pub makefile: PathBuf,

    /// Dependencies listed per generated line.
    #[serde(default = "default_deps_per_line")]
    pub deps_per_line: usize,

    /// Token for sources no object-directory rule claims.
    #[serde(default = "default_object_dir_token")]
    pub default_object_dir: String,
}

/// One prefix-to-token classification rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDirRule {
    /// Source-path prefix, matched at a path-component boundary.
    pub prefix: String,

    /// Object-directory token emitted for matching sources.
    pub token: String,
}

fn default_source_dirs() -> Vec<PathBuf> {
    [
        "src",
        "src/utils",
        "src/installer",
        "src/ifilter",
        "src/browserplugin",
        "src/previewer",
        "src/ebooktest",
        "src/ebooktest2",
        "src/mui",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

fn default_include_dirs() -> Vec<PathBuf> {
    ["mupdf/fitz", "mupdf/pdf", "mupdf/xps"]
        .iter()
        .map(PathBuf::from)
        .collect()
}

fn default_source_pattern() -> String {
    String::from("*.c*")
}

fn default_makefile() -> PathBuf {
    PathBuf::from("makefile.deps")
}

fn default_deps_per_line() -> usize {
    3
}

fn default_object_dir_token() -> String {
    String::from("$(OS)")
}

fn default_object_dirs() -> Vec<ObjectDirRule> {
    [
        ("src/utils", "$(OU)"),
        ("src/browserplugin", "$(ODLL)"),
        ("src/ifilter", "$(ODLL)"),
        ("src/previewer", "$(ODLL)"),
        ("src/ebooktest2", "$(OE2)"),
        ("src/ebooktest", "$(OEB)"),
        ("src/mui", "$(OMUI)"),
    ]
    .iter()
    .map(|(prefix, token)| ObjectDirRule {
        prefix: (*prefix).to_string(),
        token: (*token).to_string(),
    })
    .collect()
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
            object_dirs: default_object_dirs(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_dirs: default_source_dirs(),
            include_dirs: default_include_dirs(),
            source_pattern: default_source_pattern(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            makefile: default_makefile(),
            deps_per_line: default_deps_per_line(),
            default_object_dir: default_object_dir_token(),
        }
    }
}

impl DepsConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DepsError::read(path.to_path_buf(), e))?;
        let config: DepsConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file found at a candidate project root of `start`,
    /// falling back to the built-in defaults when none exists.
    ///
    /// Probes `start` itself, then its parent when `start` is the scripts
    /// directory, the same candidates project-root verification accepts.
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in project::candidate_roots(start) {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    /// The include search list: source directories first, then the extra
    /// include roots, both in configured order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.scan.source_dirs.clone();
        dirs.extend(self.scan.include_dirs.iter().cloned());
        dirs
    }
}
