//! Editor-facing analyzers for the ezsql SQL dialect.
//!
//! Everything here is host independent: documents come in through
//! [`document::LineSource`], results go out as plain data.

pub mod capability;
pub mod completion;
pub mod document;
pub mod import;
pub mod keywords;
pub mod resolve;


pub use capability::{
    CommandCapability, CommandOutput, CompletionCapability, DefinitionCapability, EzsqlCompletion, EzsqlDefinition,
    HelloWorldCommand, LANGUAGE_ID,
};
pub use completion::{Suggestion, SuggestionKind, assemble_completions};
pub use document::{LineSource, TextDocument};
pub use import::{ImportMatch, ImportStatement, match_import, scan_head_imports};
pub use resolve::{DefinitionLink, LineSpan, ResolveOptions, find_source_root, resolve_definition};
