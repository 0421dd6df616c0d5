use ezsql_core::{CompletionCapability, Suggestion, SuggestionKind};
use ropey::Rope;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation, Position};

use super::text::{RopeLines, line_prefix};

/// Completion list for the cursor at `position`, unfiltered.
pub fn completion_items(content: &Rope, position: Position, capability: &dyn CompletionCapability) -> Vec<CompletionItem> {
    let prefix = line_prefix(content, position);
    capability
        .complete(&RopeLines(content), &prefix)
        .into_iter()
        .map(to_completion_item)
        .collect()
}

fn to_completion_item(suggestion: Suggestion) -> CompletionItem {
    let kind = match suggestion.kind {
        SuggestionKind::Keyword => CompletionItemKind::KEYWORD,
        SuggestionKind::Module => CompletionItemKind::MODULE,
    };
    CompletionItem {
        label: suggestion.label,
        kind: Some(kind),
        documentation: Some(Documentation::String(suggestion.documentation)),
        ..Default::default()
    }
}
