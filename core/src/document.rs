use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Read-only, line-addressable view over a document's text.
///
/// Lines are returned without their trailing line break.
pub trait LineSource {
    fn line_count(&self) -> usize;
    fn line(&self, idx: usize) -> Option<Cow<'_, str>>;
}

/// Owned document text with an optional on-disk location.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    lines: Vec<String>,
    path: Option<PathBuf>,
}

impl TextDocument {
    pub fn new(text: &str) -> Self {
        Self {
            lines: split_lines(text),
            path: None,
        }
    }

    pub fn with_path(text: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            lines: split_lines(text),
            path: Some(path.into()),
        }
    }

    /// Load a document from disk, remembering where it came from.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path.display()))?;
        Ok(Self::with_path(&text, path))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl LineSource for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        self.lines.get(idx).map(|l| Cow::Borrowed(l.as_str()))
    }
}

// Breaks on `\r\n`, `\n` and a lone `\r`, like LSP clients. `str::lines` would
// drop a trailing empty line that editors still address.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(['\n', '\r']) {
        lines.push(rest[..pos].to_string());
        let break_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + break_len..];
    }
    lines.push(rest.to_string());
    lines
}
