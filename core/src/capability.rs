//! Host-independent editor capabilities for the ezsql dialect.
//!
//! A host adapter (the LSP server in this workspace) registers these under
//! [`LANGUAGE_ID`] and translates its own request types into calls here.

use std::path::Path;

use crate::completion::{IMPORT_TRIGGER, Suggestion, assemble_completions};
use crate::document::LineSource;
use crate::resolve::{DefinitionLink, ResolveOptions, resolve_definition};

pub const LANGUAGE_ID: &str = "ezsql";
pub const HELLO_WORLD_COMMAND: &str = "ezsql.helloWorld";

pub trait CompletionCapability {
    /// Characters that should trigger completion in addition to identifier typing.
    fn trigger_characters(&self) -> Vec<String>;
    fn complete(&self, doc: &dyn LineSource, line_prefix: &str) -> Vec<Suggestion>;
}

pub trait DefinitionCapability {
    fn definition(&self, doc_path: &Path, doc: &dyn LineSource, line: usize) -> Option<DefinitionLink>;
}

/// Outcome of running a command: a message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Info(String),
}

pub trait CommandCapability {
    fn id(&self) -> &str;
    fn invoke(&self) -> CommandOutput;
}

#[derive(Debug, Clone)]
pub struct EzsqlCompletion {
    /// When false, the trigger character no longer adds import references.
    pub import_references: bool,
}

impl Default for EzsqlCompletion {
    fn default() -> Self {
        Self { import_references: true }
    }
}

impl CompletionCapability for EzsqlCompletion {
    fn trigger_characters(&self) -> Vec<String> {
        vec![IMPORT_TRIGGER.to_string()]
    }

    fn complete(&self, doc: &dyn LineSource, line_prefix: &str) -> Vec<Suggestion> {
        if !self.import_references {
            // A prefix without the trigger yields keywords only
            return assemble_completions(doc, "");
        }
        assemble_completions(doc, line_prefix)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EzsqlDefinition {
    pub options: ResolveOptions,
}

impl DefinitionCapability for EzsqlDefinition {
    fn definition(&self, doc_path: &Path, doc: &dyn LineSource, line: usize) -> Option<DefinitionLink> {
        let text = doc.line(line)?;
        resolve_definition(doc_path, line, &text, &self.options)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HelloWorldCommand;

impl CommandCapability for HelloWorldCommand {
    fn id(&self) -> &str {
        HELLO_WORLD_COMMAND
    }

    fn invoke(&self) -> CommandOutput {
        CommandOutput::Info("Hello World from ezsql!".to_string())
    }
}
