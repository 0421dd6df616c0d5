//! Go-to-definition for import lines.
//!
//! `import a.b.c` on any line resolves to `<root>/src/a/b/c.ezsql`, where `<root>` is the
//! nearest ancestor of the importing file that has a `src` directory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::import::{match_import, module_path_to_file};

pub const DEFAULT_SOURCE_DIR: &str = "src";
pub const DEFAULT_EXTENSION: &str = "ezsql";

/// Project layout knobs used while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    pub source_dir: String,
    pub extension: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Half-open byte range `[start, end)` on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Navigation target for an import line. The target position is always the start of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionLink {
    pub origin: LineSpan,
    pub target: PathBuf,
}

/// Walk up from `start` (inclusive) to the first directory holding a `source_dir` directory.
///
/// The filesystem root itself is never probed. Returns the source directory, not its parent.
pub fn find_source_root(start: &Path, source_dir: &str) -> Option<PathBuf> {
    let mut dir = start;
    // `parent()` is None only at the root (or an empty relative path)
    while let Some(parent) = dir.parent() {
        let candidate = dir.join(source_dir);
        if candidate.is_dir() {
            return Some(candidate);
        }
        dir = parent;
    }
    None
}

/// Resolve the import on `line` (line index `line_number` of the document at `doc_path`).
///
/// Every failure is an absence: no import on the line, no source root, or no target file.
pub fn resolve_definition(
    doc_path: &Path,
    line_number: usize,
    line: &str,
    options: &ResolveOptions,
) -> Option<DefinitionLink> {
    let m = match_import(line)?;
    let relative = module_path_to_file(m.path, &options.extension);

    let start = doc_path.parent()?;
    let Some(src_dir) = find_source_root(start, &options.source_dir) else {
        debug!(doc = %doc_path.display(), "no source root above document");
        return None;
    };

    let target = src_dir.join(&relative);
    if !target.is_file() {
        debug!(target = %target.display(), "import target does not exist");
        return None;
    }

    // Capture offsets rather than a substring search, so a path echoed earlier
    // on the line cannot steal the highlight.
    Some(DefinitionLink {
        origin: LineSpan {
            line: line_number,
            start: m.path_span.start,
            end: m.path_span.end,
        },
        target,
    })
}
