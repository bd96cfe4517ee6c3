//! Include-path resolution against the configured search directories.

use std::path::{Component, Path, PathBuf};

use crate::config::DepsConfig;

/// Resolves literal `#include` names to project-relative header paths.
///
/// Search order is fixed and significant: the directory containing the
/// including file always comes first, then every configured search directory
/// in order. The first candidate that exists wins.
pub struct IncludeResolver {
    root: PathBuf,
    search_dirs: Vec<PathBuf>,
}

impl IncludeResolver {
    pub fn new(root: impl Into<PathBuf>, config: &DepsConfig) -> Self {
        Self {
            root: root.into(),
            search_dirs: config.search_dirs(),
        }
    }

    /// Resolve the include string `name` as written in the file `from`
    /// (a root-relative path).
    ///
    /// Returns the first existing candidate as a root-relative, lexically
    /// normalized path, or `None` when the name matches nothing; the caller
    /// drops it silently.
    pub fn resolve(&self, from: &Path, name: &str) -> Option<PathBuf> {
        // Include strings occasionally carry Windows separators.
        let name = name.replace('\\', "/");

        let containing = from.parent().map(Path::to_path_buf).unwrap_or_default();
        let candidates = std::iter::once(&containing).chain(self.search_dirs.iter());

        for dir in candidates {
            let candidate = normalize(&dir.join(&name));
            if self.root.join(&candidate).is_file() {
                return Some(candidate);
            }
        }
        tracing::debug!("dropped unresolvable include {:?} (from {})", name, from.display());
        None
    }
}

/// Collapse `.` and `name/..` segments without consulting the filesystem.
///
/// Keeps resolved paths in one canonical spelling, so a header reached both
/// as `src/x.h` and as `src/sub/../x.h` is a single cache key and a single
/// dependency-set member. Leading `..` segments have nothing to cancel and
/// are kept.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    fn resolver(root: &Path, search_dirs: &[&str]) -> IncludeResolver {
        let mut config = DepsConfig::default();
        config.scan.source_dirs = search_dirs.iter().map(PathBuf::from).collect();
        config.scan.include_dirs = Vec::new();
        IncludeResolver::new(root, &config)
    }

    #[test]
    fn test_containing_directory_wins() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/sub/x.h");
        touch(tmp.path(), "src/x.h");

        let resolver = resolver(tmp.path(), &["src"]);
        let found = resolver.resolve(Path::new("src/sub/a.c"), "x.h").unwrap();
        assert_eq!(found, PathBuf::from("src/sub/x.h"));
    }

    #[test]
    fn test_search_directory_order_is_fixed() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "first/x.h");
        touch(tmp.path(), "second/x.h");

        let resolver = resolver(tmp.path(), &["first", "second"]);
        let found = resolver.resolve(Path::new("elsewhere/a.c"), "x.h").unwrap();
        assert_eq!(found, PathBuf::from("first/x.h"));
    }

    #[test]
    fn test_unresolvable_include_is_none() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/a.c");

        let resolver = resolver(tmp.path(), &["src"]);
        assert!(resolver.resolve(Path::new("src/a.c"), "nowhere.h").is_none());
    }

    #[test]
    fn test_parent_traversal_resolves_normalized() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/utils/u.h");
        touch(tmp.path(), "src/installer/a.c");

        let resolver = resolver(tmp.path(), &["src"]);
        let found = resolver
            .resolve(Path::new("src/installer/a.c"), "../utils/u.h")
            .unwrap();
        assert_eq!(found, PathBuf::from("src/utils/u.h"));
    }

    #[test]
    fn test_windows_separators_in_include_name() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/mui/Mui.h");

        let resolver = resolver(tmp.path(), &["src"]);
        let found = resolver.resolve(Path::new("src/a.c"), "mui\\Mui.h").unwrap();
        assert_eq!(found, PathBuf::from("src/mui/Mui.h"));
    }

    #[test]
    fn test_directories_are_not_matches() {
        // A directory named like a header must not satisfy the probe.
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/x.h")).unwrap();
        touch(tmp.path(), "other/x.h");

        let resolver = resolver(tmp.path(), &["src", "other"]);
        let found = resolver.resolve(Path::new("src/a.c"), "x.h").unwrap();
        assert_eq!(found, PathBuf::from("other/x.h"));
    }

    #[test]
    fn test_normalize() {
        let cases = [
            ("a/b/../c", "a/c"),
            ("./a/b", "a/b"),
            ("a/./b", "a/b"),
            ("a/..", ""),
            ("../a", "../a"),
            ("a/b/../../c", "c"),
            ("src/installer/../utils/u.h", "src/utils/u.h"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                normalize(Path::new(input)),
                PathBuf::from(expected),
                "normalize({:?})",
                input
            );
        }
    }
}
