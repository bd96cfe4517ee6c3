//! Header-dependency scanning for makefile-driven C/C++ builds.
//!
//! This crate provides:
//! - Source enumeration over a configured set of directories
//! - `#include` extraction and transitive closure with cycle handling
//! - Object-directory classification by source-path prefix
//! - Generation of a `makefile.deps` fragment with CRLF line endings
//!
//! Everything is driven by a `makedeps.toml` at the project root; every
//! field has a built-in default, so the file is optional.
//!
//! # Example
//!
//! ```toml
//! # makedeps.toml
//! [scan]
//! source_dirs = ["src", "src/utils"]
//! include_dirs = ["third-party/zlib"]
//! source_pattern = "*.c*"
//!
//! [output]
//! makefile = "makefile.deps"
//! deps_per_line = 3
//!
//! [[object_dir]]
//! prefix = "src/utils"
//! token = "$(OU)"
//! ```

use std::path::{Path, PathBuf};

mod config;
mod emit;
mod error;
mod extract;
mod objdir;
mod project;
mod resolve;
mod sources;

pub use config::{DepsConfig, ObjectDirRule, OutputConfig, ScanConfig, CONFIG_FILE};
pub use emit::{flatten_dependency_lines, render_fragment, write_fragment};
pub use error::{DepsError, Result};
pub use extract::IncludeScanner;
pub use objdir::ObjectDirMap;
pub use project::{enter_project_root, find_project_root, is_project_root};
pub use resolve::IncludeResolver;
pub use sources::{build_dependency_map, collect_sources, DependencyMap};

/// What a dependency-update run produced.
#[derive(Debug)]
pub struct UpdateSummary {
    /// Source files scanned.
    pub sources: usize,
    /// Dependency lines written.
    pub lines: usize,
    /// The written fragment, relative to the project root.
    pub makefile: PathBuf,
}

/// Regenerate the dependency fragment for the project at `root`.
///
/// Runs the whole pipeline: enumerate sources, extract transitive includes,
/// classify object directories, format the fragment, and overwrite the
/// configured makefile.
pub fn update_dependencies(root: &Path, config: &DepsConfig) -> Result<UpdateSummary> {
    let map = build_dependency_map(root, config)?;
    let objdirs = ObjectDirMap::new(config);

    let lines = flatten_dependency_lines(&map, &objdirs, config.output.deps_per_line);
    let line_count = lines.len();
    let fragment = render_fragment(lines);
    write_fragment(root, &config.output.makefile, &fragment)?;

    tracing::info!(
        "wrote {} dependency lines for {} sources to {}",
        line_count,
        map.len(),
        config.output.makefile.display()
    );
    Ok(UpdateSummary {
        sources: map.len(),
        lines: line_count,
        makefile: config.output.makefile.clone(),
    })
}
