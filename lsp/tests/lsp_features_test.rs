use std::fs;

use ezsql_core::keywords::KEYWORDS;
use ezsql_core::{EzsqlCompletion, EzsqlDefinition};
use ezsql_lsp::{completion_items, definition_links};
use ropey::Rope;
use tower_lsp::lsp_types::{CompletionItemKind, Documentation, Position, Range, Url};

const HEADER_DOC: &str = "<head>\n  import a.b.c\n  import x.y as z\n</head>\nselect * from @\n";

fn labels(items: &[tower_lsp::lsp_types::CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

#[test]
fn test_completion_without_trigger_is_keywords() {
    let rope = Rope::from_str(HEADER_DOC);
    let items = completion_items(&rope, Position::new(4, 14), &EzsqlCompletion::default());
    assert_eq!(labels(&items), KEYWORDS.to_vec());
    assert!(items.iter().all(|i| i.kind == Some(CompletionItemKind::KEYWORD)));
    assert_eq!(
        items[7].documentation,
        Some(Documentation::String("ezsql keyword: select".to_string()))
    );
}

#[test]
fn test_completion_after_trigger_adds_imports() {
    let rope = Rope::from_str(HEADER_DOC);
    let items = completion_items(&rope, Position::new(4, 15), &EzsqlCompletion::default());
    let tail: Vec<&str> = labels(&items)[KEYWORDS.len()..].to_vec();
    assert_eq!(tail, vec!["{a.b.c", "{x.y", "{z"]);
    assert!(items[KEYWORDS.len()..]
        .iter()
        .all(|i| i.kind == Some(CompletionItemKind::MODULE)));
}

#[test]
fn test_completion_on_unknown_document_is_keywords() {
    let items = completion_items(&Rope::new(), Position::new(3, 1), &EzsqlCompletion::default());
    assert_eq!(items.len(), KEYWORDS.len());
}

#[test]
fn test_completion_is_idempotent() {
    let rope = Rope::from_str(HEADER_DOC);
    let cap = EzsqlCompletion::default();
    let first = completion_items(&rope, Position::new(4, 15), &cap);
    let second = completion_items(&rope, Position::new(4, 15), &cap);
    assert_eq!(first, second);
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("src/foo")).expect("mkdir src");
    fs::create_dir_all(dir.path().join("reports")).expect("mkdir reports");
    fs::write(dir.path().join("src/foo/bar.ezsql"), "select 1").expect("write target");
    dir
}

#[test]
fn test_definition_links_to_target_file_start() {
    let dir = project();
    let doc_path = dir.path().join("reports/daily.ezsql");
    let uri = Url::from_file_path(&doc_path).expect("uri");
    let rope = Rope::from_str("<head>\n  import foo.bar as fb\n</head>");

    let links = definition_links(&uri, &rope, Position::new(1, 12), &EzsqlDefinition::default()).expect("links");
    assert_eq!(links.len(), 1);
    let link = &links[0];
    assert_eq!(
        link.origin_selection_range,
        Some(Range::new(Position::new(1, 9), Position::new(1, 16)))
    );
    let expected = Url::from_file_path(dir.path().join("src/foo/bar.ezsql")).expect("target uri");
    assert_eq!(link.target_uri, expected);
    assert_eq!(link.target_range, Range::new(Position::new(0, 0), Position::new(0, 0)));
    assert_eq!(link.target_selection_range, link.target_range);
}

#[test]
fn test_definition_counts_utf16_columns() {
    let dir = project();
    let uri = Url::from_file_path(dir.path().join("reports/daily.ezsql")).expect("uri");
    let rope = Rope::from_str("-- 日本 import foo.bar");

    let links = definition_links(&uri, &rope, Position::new(0, 0), &EzsqlDefinition::default()).expect("links");
    assert_eq!(
        links[0].origin_selection_range,
        Some(Range::new(Position::new(0, 13), Position::new(0, 20)))
    );
}

#[test]
fn test_definition_missing_target_is_none() {
    let dir = project();
    let uri = Url::from_file_path(dir.path().join("reports/daily.ezsql")).expect("uri");
    let rope = Rope::from_str("import foo.nothing");
    assert!(definition_links(&uri, &rope, Position::new(0, 8), &EzsqlDefinition::default()).is_none());
}

#[test]
fn test_definition_non_import_line_is_none() {
    let dir = project();
    let uri = Url::from_file_path(dir.path().join("reports/daily.ezsql")).expect("uri");
    let rope = Rope::from_str("import foo.bar\nselect 1");
    assert!(definition_links(&uri, &rope, Position::new(1, 2), &EzsqlDefinition::default()).is_none());
    assert!(definition_links(&uri, &rope, Position::new(7, 0), &EzsqlDefinition::default()).is_none());
}

#[test]
fn test_definition_requires_file_uri() {
    let uri = Url::parse("untitled:Untitled-1").expect("uri");
    let rope = Rope::from_str("import foo.bar");
    assert!(definition_links(&uri, &rope, Position::new(0, 0), &EzsqlDefinition::default()).is_none());
}

#[test]
fn test_definition_after_unicode_separators_keeps_line_numbers() {
    let dir = project();
    let uri = Url::from_file_path(dir.path().join("reports/daily.ezsql")).expect("uri");

    // LSP clients only break on \n, \r\n and \r; U+2028 and form feed stay inside a line
    for text in ["-- note\u{2028}x\nimport foo.bar", "select 1\u{000C}\nimport foo.bar"] {
        let rope = Rope::from_str(text);
        let links = definition_links(&uri, &rope, Position::new(1, 3), &EzsqlDefinition::default())
            .unwrap_or_else(|| panic!("no definition for {text:?}"));
        assert_eq!(
            links[0].origin_selection_range,
            Some(Range::new(Position::new(1, 7), Position::new(1, 14)))
        );
    }
}

#[test]
fn test_completion_after_unicode_separator_reads_cursor_line() {
    let rope = Rope::from_str("<head>\n-- a\u{2028}b\nimport x.y as z\n</head>\nselect @");
    let items = completion_items(&rope, Position::new(4, 8), &EzsqlCompletion::default());
    assert_eq!(labels(&items)[KEYWORDS.len()..].to_vec(), vec!["{x.y", "{z"]);
}
