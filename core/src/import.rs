//! Import declarations: the per-line grammar and the header-region scanner.
//!
//! Grammar: `import <dotted-path>[ as <alias>]`, where the path charset is
//! `[A-Za-z0-9_.]` and the alias charset is `[A-Za-z0-9_]`. Only the first
//! match on a line counts.

use std::ops::Range;
use std::path::{MAIN_SEPARATOR_STR, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::document::LineSource;

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"import\s+([a-zA-Z0-9_.]+)(?:\s+as\s+([a-zA-Z0-9_]+))?").expect("import grammar is a valid regex")
});
static HEAD_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<head(\s|>)").expect("head open marker is a valid regex"));
static HEAD_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</head>").expect("head close marker is a valid regex"));

/// One import declaration found by [`scan_head_imports`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStatement {
    /// The trimmed source line.
    pub original: String,
    /// Dotted module path, e.g. `a.b.c`.
    pub path: String,
    pub alias: Option<String>,
    /// Zero-based line index in the owning document.
    pub line_number: usize,
}

impl ImportStatement {
    /// `a.b.c` -> `a/b/c.<ext>`.
    pub fn relative_file(&self, extension: &str) -> PathBuf {
        module_path_to_file(&self.path, extension)
    }
}

/// Grammar match on a single line, borrowing from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMatch<'a> {
    pub path: &'a str,
    /// Byte range of `path` within the matched line.
    pub path_span: Range<usize>,
    pub alias: Option<&'a str>,
}

/// Apply the import grammar to one line.
pub fn match_import(line: &str) -> Option<ImportMatch<'_>> {
    let caps = IMPORT_RE.captures(line)?;
    let path = caps.get(1)?;
    Some(ImportMatch {
        path: path.as_str(),
        path_span: path.range(),
        alias: caps.get(2).map(|m| m.as_str()),
    })
}

/// Map a dotted module path to a relative file path with the given extension.
pub fn module_path_to_file(module_path: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", module_path.replace('.', MAIN_SEPARATOR_STR), extension))
}

/// Collect the import declarations inside the first `<head>` ... `</head>` region.
///
/// The marker lines themselves are never scanned, and nothing after the first
/// closing marker is considered. Without an opening marker the result is empty.
pub fn scan_head_imports<D: LineSource + ?Sized>(doc: &D) -> Vec<ImportStatement> {
    let mut results = Vec::new();
    let mut in_head = false;

    for i in 0..doc.line_count() {
        let Some(raw) = doc.line(i) else { break };
        let line = raw.trim();

        if HEAD_OPEN_RE.is_match(line) {
            in_head = true;
            continue;
        }
        if HEAD_CLOSE_RE.is_match(line) {
            break;
        }
        if !in_head {
            continue;
        }

        if let Some(m) = match_import(line) {
            results.push(ImportStatement {
                original: line.to_string(),
                path: m.path.to_string(),
                alias: m.alias.map(str::to_string),
                line_number: i,
            });
        }
    }

    tracing::debug!(count = results.len(), "scanned head imports");
    results
}
