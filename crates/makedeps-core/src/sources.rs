//! Enumerating source files and building the per-source dependency map.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::DepsConfig;
use crate::error::{DepsError, Result};
use crate::extract::IncludeScanner;
use crate::resolve::normalize;

/// Root-relative source path to the headers it transitively includes.
/// Insertion order follows the configured directory list, so iteration is
/// deterministic without further sorting.
pub type DependencyMap = IndexMap<PathBuf, Vec<PathBuf>>;

/// List the files in the configured source directories whose names match
/// the source pattern, as root-relative paths.
///
/// Directories are visited in configuration order and entries within a
/// directory are name-sorted. Non-file entries are skipped; a configured
/// directory that does not exist is an error.
pub fn collect_sources(root: &Path, config: &DepsConfig) -> Result<Vec<PathBuf>> {
    let pattern = glob::Pattern::new(&config.scan.source_pattern).map_err(|e| {
        DepsError::BadPattern {
            pattern: config.scan.source_pattern.clone(),
            source: e,
        }
    })?;

    let mut sources = Vec::new();
    for dir in &config.scan.source_dirs {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(root.join(dir)).map_err(|e| DepsError::read(dir, e))? {
            let entry = entry.map_err(|e| DepsError::read(dir, e))?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                // The pattern and the fragment are both UTF-8; such a name
                // can never match or be emitted.
                Err(name) => {
                    tracing::debug!("skipped non-UTF-8 entry {:?} in {}", name, dir.display())
                }
            }
        }
        names.sort();

        let before = sources.len();
        for name in names {
            if pattern.matches(&name) && root.join(dir).join(&name).is_file() {
                sources.push(normalize(&dir.join(&name)));
            }
        }
        tracing::debug!("{}: {} source files", dir.display(), sources.len() - before);
    }
    Ok(sources)
}

/// Scan every configured source file and map it to its transitive includes.
pub fn build_dependency_map(root: &Path, config: &DepsConfig) -> Result<DependencyMap> {
    let mut scanner = IncludeScanner::new(root, config);
    let mut map = DependencyMap::new();
    for source in collect_sources(root, config)? {
        let deps = scanner.transitive_includes(&source)?;
        map.insert(source, deps);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn config(dirs: &[&str]) -> DepsConfig {
        let mut config = DepsConfig::default();
        config.scan.source_dirs = dirs.iter().map(PathBuf::from).collect();
        config.scan.include_dirs = Vec::new();
        config
    }

    #[test]
    fn test_pattern_filters_directory_entries() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/a.c", "");
        write(tmp.path(), "src/b.cpp", "");
        write(tmp.path(), "src/readme.txt", "");
        write(tmp.path(), "src/h.h", "");

        let sources = collect_sources(tmp.path(), &config(&["src"])).unwrap();
        assert_eq!(sources, vec![PathBuf::from("src/a.c"), PathBuf::from("src/b.cpp")]);
    }

    #[test]
    fn test_directories_visited_in_configured_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/utils/z.c", "");
        write(tmp.path(), "src/a.c", "");
        write(tmp.path(), "src/b.c", "");

        let sources = collect_sources(tmp.path(), &config(&["src", "src/utils"])).unwrap();
        assert_eq!(
            sources,
            vec![
                PathBuf::from("src/a.c"),
                PathBuf::from("src/b.c"),
                PathBuf::from("src/utils/z.c"),
            ]
        );
    }

    #[test]
    fn test_enumeration_does_not_recurse() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/a.c", "");
        write(tmp.path(), "src/nested/b.c", "");

        let sources = collect_sources(tmp.path(), &config(&["src"])).unwrap();
        assert_eq!(sources, vec![PathBuf::from("src/a.c")]);
    }

    #[test]
    fn test_matching_subdirectory_names_are_skipped() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/weird.c")).unwrap();
        write(tmp.path(), "src/a.c", "");

        let sources = collect_sources(tmp.path(), &config(&["src"])).unwrap();
        assert_eq!(sources, vec![PathBuf::from("src/a.c")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_entry_names_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/a.c", "");
        let weird = std::ffi::OsString::from_vec(b"bad\xff.c".to_vec());
        std::fs::write(tmp.path().join("src").join(&weird), b"").unwrap();

        let sources = collect_sources(tmp.path(), &config(&["src"])).unwrap();
        assert_eq!(sources, vec![PathBuf::from("src/a.c")]);
    }

    #[test]
    fn test_missing_source_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/a.c", "");

        let err = collect_sources(tmp.path(), &config(&["src", "src/gone"])).unwrap_err();
        assert!(matches!(err, DepsError::Read { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut config = config(&[]);
        config.scan.source_pattern = "[".to_string();

        let err = collect_sources(tmp.path(), &config).unwrap_err();
        assert!(matches!(err, DepsError::BadPattern { .. }));
    }

    #[test]
    fn test_dependency_map_keys_follow_source_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/a.c", "#include \"h.h\"\n");
        write(tmp.path(), "src/b.c", "");
        write(tmp.path(), "src/h.h", "");

        let map = build_dependency_map(tmp.path(), &config(&["src"])).unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![PathBuf::from("src/a.c"), PathBuf::from("src/b.c")]);
        assert_eq!(map[Path::new("src/a.c")], vec![PathBuf::from("src/h.h")]);
        assert!(map[Path::new("src/b.c")].is_empty());
    }
}
