use std::borrow::Cow;

use ezsql_core::LineSource;
use ropey::Rope;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

// Convert LSP UTF-16 position to Rope char index (scalar values), clamped to the end of the line.
pub(crate) fn position_to_char_idx(text: &Rope, pos: Position) -> usize {
    let line_idx = pos.line as usize;
    if line_idx >= text.len_lines() {
        return text.len_chars();
    }
    let line_start_char = text.line_to_char(line_idx);
    let line_slice = text.line(line_idx);
    let target_utf16 = pos.character as usize;

    if let Some(s) = line_slice.as_str() {
        if s.is_ascii() {
            let clamped = target_utf16.min(s.len());
            return line_start_char + clamped;
        }
    }

    let mut seen_utf16 = 0usize;
    let mut chars_in_line = 0usize;
    for ch in line_slice.chars() {
        let u16_len = ch.len_utf16();
        if seen_utf16 + u16_len > target_utf16 {
            break;
        }
        seen_utf16 += u16_len;
        chars_in_line += 1;
        if seen_utf16 == target_utf16 {
            break;
        }
    }
    line_start_char + chars_in_line
}

// Apply incremental LSP changes to a rope buffer.
pub(crate) fn apply_incremental_change_rope(text: &mut Rope, change: &TextDocumentContentChangeEvent) {
    if let Some(range) = &change.range {
        let start_char = position_to_char_idx(text, range.start);
        let end_char = position_to_char_idx(text, range.end);
        let (s, e) = if start_char <= end_char {
            (start_char, end_char)
        } else {
            (end_char, start_char)
        };
        if s != e {
            text.remove(s..e);
        }
        if !change.text.is_empty() {
            text.insert(s, &change.text);
        }
    } else {
        *text = Rope::from_str(&change.text);
    }
}

/// Text of the cursor's line up to the cursor. Empty when the line is out of range.
pub(crate) fn line_prefix(text: &Rope, pos: Position) -> String {
    let line_idx = pos.line as usize;
    if line_idx >= text.len_lines() {
        return String::new();
    }
    let line_start_char = text.line_to_char(line_idx);
    let abs_char = position_to_char_idx(text, pos);
    let within_line = abs_char.saturating_sub(line_start_char);
    let line = text.line(line_idx);
    let prefix = line.slice(..within_line.min(line.len_chars())).to_string();
    prefix.trim_end_matches(['\n', '\r']).to_string()
}

// Byte offset within a line to a UTF-16 column, clamped to the line length.
pub(crate) fn byte_to_utf16_col(line: &str, byte: usize) -> u32 {
    let mut end = byte.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].chars().map(char::len_utf16).sum::<usize>() as u32
}

/// Line view over a rope for the core analyzers; line breaks are stripped.
pub struct RopeLines<'a>(pub &'a Rope);

impl LineSource for RopeLines<'_> {
    fn line_count(&self) -> usize {
        self.0.len_lines()
    }

    fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        if idx >= self.0.len_lines() {
            return None;
        }
        let line: Cow<'_, str> = self.0.line(idx).into();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        Some(match line {
            Cow::Borrowed(s) => Cow::Borrowed(&s[..trimmed]),
            Cow::Owned(mut s) => {
                s.truncate(trimmed);
                Cow::Owned(s)
            }
        })
    }
}
