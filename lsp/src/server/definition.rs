use ezsql_core::{DefinitionCapability, LineSource};
use ropey::Rope;
use tower_lsp::lsp_types::{LocationLink, Position, Range, Url};

use super::text::{RopeLines, byte_to_utf16_col};

/// Definition links for the import on the cursor's line; `None` when nothing resolves.
///
/// Only the line matters, not the column: any position on an import line navigates.
pub fn definition_links(
    uri: &Url,
    content: &Rope,
    position: Position,
    capability: &dyn DefinitionCapability,
) -> Option<Vec<LocationLink>> {
    let doc_path = uri.to_file_path().ok()?;
    let lines = RopeLines(content);
    let line_idx = position.line as usize;

    let link = capability.definition(&doc_path, &lines, line_idx)?;
    let line_text = lines.line(line_idx)?;
    let start = byte_to_utf16_col(&line_text, link.origin.start);
    let end = byte_to_utf16_col(&line_text, link.origin.end);
    let target_uri = Url::from_file_path(&link.target).ok()?;

    let file_start = Range::new(Position::new(0, 0), Position::new(0, 0));
    Some(vec![LocationLink {
        origin_selection_range: Some(Range::new(
            Position::new(position.line, start),
            Position::new(position.line, end),
        )),
        target_uri,
        target_range: file_start,
        target_selection_range: file_start,
    }])
}
