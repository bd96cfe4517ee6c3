//! Formatting and writing the generated makefile fragment.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{DepsError, Result};
use crate::objdir::ObjectDirMap;
use crate::sources::DependencyMap;

/// Two comment lines marking the file as generated.
const HEADER: &str = "## Header-dependencies for src\\* and src\\*\\*\n\
                      ### the list below is auto-generated by makedeps\n";

fn backslashed(path: &Path) -> String {
    path.to_string_lossy().replace('/', "\\")
}

/// Turn the dependency map into unsorted target lines.
///
/// Sources with an empty dependency set are skipped. Each remaining source
/// yields one line per chunk of `deps_per_line` dependencies, in the form
/// `<token>\<stem>.obj: <dep> <dep> <dep>`, with the dependency set sorted
/// case-insensitively before chunking.
pub fn flatten_dependency_lines(
    map: &DependencyMap,
    objdirs: &ObjectDirMap,
    deps_per_line: usize,
) -> Vec<String> {
    let per_line = deps_per_line.max(1);

    let mut lines = Vec::new();
    for (source, deps) in map {
        if deps.is_empty() {
            continue;
        }
        let token = objdirs.classify(source);
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        let mut dep_names: Vec<String> = deps.iter().map(|d| backslashed(d)).collect();
        dep_names.sort_by_key(|name| name.to_lowercase());

        for chunk in dep_names.chunks(per_line) {
            lines.push(format!("{token}\\{stem}.obj: {}", chunk.join(" ")));
        }
    }
    lines
}

/// Assemble the final fragment text (LF line endings).
///
/// Lines are sorted case-insensitively as a whole, joined, and then
/// path-normalized, so the sort sees the lines as generated, not as
/// normalized. An empty line set still produces the header plus one blank
/// line.
pub fn render_fragment(mut lines: Vec<String>) -> String {
    lines.sort_by_key(|line| line.to_lowercase());
    let body = normalize_paths(&lines.join("\n"));
    format!("{HEADER}{body}\n")
}

/// Textual path cleanup applied to the rendered body.
///
/// Converts every `/` to `\`, then collapses one level of `<dir>\..\`
/// per site in a single left-to-right pass. The dir segment may not
/// contain dots, so `v1.2\..\` is left alone rather than half-collapsed.
fn normalize_paths(text: &str) -> String {
    static UPDOWN: OnceLock<Regex> = OnceLock::new();
    let updown = UPDOWN.get_or_init(|| Regex::new(r"( |\\)[^.\\\s]+\\\.\.\\").unwrap());
    updown.replace_all(&text.replace('/', "\\"), "$1").into_owned()
}

/// Write the fragment to `makefile` under `root` with CRLF line endings,
/// replacing any previous content.
pub fn write_fragment(root: &Path, makefile: &Path, content: &str) -> Result<()> {
    let crlf = content.replace('\n', "\r\n");
    std::fs::write(root.join(makefile), crlf).map_err(|e| DepsError::write(makefile, e))
}
