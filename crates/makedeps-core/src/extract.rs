//! `#include` extraction and the transitive closure over headers.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use regex::bytes::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::DepsConfig;
use crate::error::{DepsError, Result};
use crate::resolve::IncludeResolver;

/// Scans source text for include directives and walks them transitively.
///
/// Direct include lists are memoized per file, so each file is read and
/// parsed at most once per scanner regardless of how many sources reach it.
/// The cache is never invalidated; a scanner is built, used for one pass
/// over the tree, and dropped.
pub struct IncludeScanner {
    root: PathBuf,
    resolver: IncludeResolver,
    block_comment: Regex,
    directive: Regex,
    direct_cache: FxHashMap<PathBuf, Vec<PathBuf>>,
}

impl IncludeScanner {
    pub fn new(root: impl Into<PathBuf>, config: &DepsConfig) -> Self {
        let root = root.into();
        Self {
            resolver: IncludeResolver::new(&root, config),
            root,
            // Block comments collapse to a placeholder so that text around
            // them keeps (or loses) its line position exactly as written.
            block_comment: Regex::new(r"(?s)/\*.*?\*/").unwrap(),
            // Only directives at column zero with a single space count.
            directive: Regex::new(r#"(?m)^#include ["<]([^">]+)[">]"#).unwrap(),
            direct_cache: FxHashMap::default(),
        }
    }

    /// The includes of `file` itself, resolved to root-relative paths.
    /// Unresolvable names are dropped. Results are cached.
    fn direct_includes(&mut self, file: &Path) -> Result<&[PathBuf]> {
        if !self.direct_cache.contains_key(file) {
            let content = std::fs::read(self.root.join(file))
                .map_err(|e| DepsError::read(file, e))?;
            let stripped = self.block_comment.replace_all(&content, &b"/* */"[..]);

            let mut resolved = Vec::new();
            for cap in self.directive.captures_iter(&stripped) {
                let name = String::from_utf8_lossy(&cap[1]);
                if let Some(path) = self.resolver.resolve(file, &name) {
                    resolved.push(path);
                }
            }
            tracing::debug!("scanned {} ({} includes)", file.display(), resolved.len());
            self.direct_cache.insert(file.to_path_buf(), resolved);
        }
        Ok(&self.direct_cache[file])
    }

    /// Every header reachable from `origin` through include directives,
    /// in discovery order. The origin itself is never in the result, even
    /// when an include cycle leads back to it.
    pub fn transitive_includes(&mut self, origin: &Path) -> Result<Vec<PathBuf>> {
        let mut visited = FxHashSet::default();
        visited.insert(origin.to_path_buf());

        let mut worklist = VecDeque::new();
        worklist.push_back(origin.to_path_buf());

        let mut deps = Vec::new();
        while let Some(file) = worklist.pop_front() {
            for dep in self.direct_includes(&file)?.to_vec() {
                if visited.insert(dep.clone()) {
                    deps.push(dep.clone());
                    worklist.push_back(dep);
                }
            }
        }
        Ok(deps)
    }
}
