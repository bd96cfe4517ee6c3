//! Mapping source paths to the build system's object-directory tokens.

use std::path::Path;

use crate::config::DepsConfig;

/// Data-driven dispatch from source-path prefixes to object-directory
/// tokens like `$(OU)`. Rules are tried top to bottom and the first hit
/// wins; sources matching nothing get the default token.
pub struct ObjectDirMap {
    // (backslashed prefix ending in '\', token)
    rules: Vec<(String, String)>,
    default_token: String,
}

impl ObjectDirMap {
    pub fn new(config: &DepsConfig) -> Self {
        let rules = config
            .object_dirs
            .iter()
            .map(|rule| {
                let mut prefix = rule.prefix.replace('/', "\\");
                if !prefix.ends_with('\\') {
                    prefix.push('\\');
                }
                (prefix, rule.token.clone())
            })
            .collect();
        Self {
            rules,
            default_token: config.output.default_object_dir.clone(),
        }
    }

    /// The object-directory token for `source`. Prefixes only match at
    /// path-component boundaries, so `src\utils` never claims files under
    /// `src\utilsx`.
    pub fn classify(&self, source: &Path) -> &str {
        let path = source.to_string_lossy().replace('/', "\\");
        for (prefix, token) in &self.rules {
            if path.starts_with(prefix.as_str()) {
                return token;
            }
        }
        &self.default_token
    }
}
