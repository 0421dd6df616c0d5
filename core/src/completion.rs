use serde::Serialize;

use crate::document::LineSource;
use crate::import::scan_head_imports;
use crate::keywords::KEYWORDS;

/// Character that, typed right before the cursor, adds import references to completions.
pub const IMPORT_TRIGGER: char = '@';

/// Prefix placed in front of an imported module path or alias.
const REFERENCE_PREFIX: char = '{';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuggestionKind {
    Keyword,
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    pub documentation: String,
}

impl Suggestion {
    fn keyword(kw: &str) -> Self {
        Self {
            label: kw.to_string(),
            kind: SuggestionKind::Keyword,
            documentation: format!("ezsql keyword: {kw}"),
        }
    }

    fn module(name: &str, module_path: &str) -> Self {
        Self {
            label: format!("{REFERENCE_PREFIX}{name}"),
            kind: SuggestionKind::Module,
            documentation: format!("Module: {module_path}"),
        }
    }
}

/// Build the full suggestion list for a cursor whose line text before it is `line_prefix`.
///
/// Keywords always come first. When the prefix ends with [`IMPORT_TRIGGER`], every
/// header import contributes `{path` followed by `{alias` when aliased. No prefix
/// filtering happens here; the editor does its own fuzzy matching.
pub fn assemble_completions<D: LineSource + ?Sized>(doc: &D, line_prefix: &str) -> Vec<Suggestion> {
    let mut items: Vec<Suggestion> = KEYWORDS.iter().map(|kw| Suggestion::keyword(kw)).collect();

    if line_prefix.ends_with(IMPORT_TRIGGER) {
        for stmt in scan_head_imports(doc) {
            items.push(Suggestion::module(&stmt.path, &stmt.path));
            if let Some(alias) = &stmt.alias {
                items.push(Suggestion::module(alias, &stmt.path));
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    const DOC: &str = "<head>\nimport a.b.c\nimport x.y as z\n</head>\nselect @";

    fn labels(items: &[Suggestion]) -> Vec<&str> {
        items.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_without_trigger_only_keywords() {
        let doc = TextDocument::new(DOC);
        let items = assemble_completions(&doc, "select ");
        assert_eq!(labels(&items), KEYWORDS.to_vec());
        assert!(items.iter().all(|s| s.kind == SuggestionKind::Keyword));
        assert_eq!(items[0].documentation, "ezsql keyword: case");
    }

    #[test]
    fn test_trigger_appends_import_references() {
        let doc = TextDocument::new(DOC);
        let items = assemble_completions(&doc, "select @");
        assert_eq!(items.len(), KEYWORDS.len() + 3);

        let tail = &items[KEYWORDS.len()..];
        assert_eq!(labels(tail), vec!["{a.b.c", "{x.y", "{z"]);
        assert!(tail.iter().all(|s| s.kind == SuggestionKind::Module));
        assert_eq!(tail[0].documentation, "Module: a.b.c");
        assert_eq!(tail[2].documentation, "Module: x.y");
    }

    #[test]
    fn test_trigger_must_be_last_character() {
        let doc = TextDocument::new(DOC);
        let items = assemble_completions(&doc, "select @a");
        assert_eq!(items.len(), KEYWORDS.len());
    }

    #[test]
    fn test_trigger_without_head_imports() {
        let doc = TextDocument::new("import a.b\nselect @");
        let items = assemble_completions(&doc, "select @");
        assert_eq!(labels(&items), KEYWORDS.to_vec());
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let doc = TextDocument::new(DOC);
        assert_eq!(assemble_completions(&doc, "@"), assemble_completions(&doc, "@"));
    }
}
