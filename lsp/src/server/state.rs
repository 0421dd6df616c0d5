use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use ezsql_core::{CommandCapability, HelloWorldCommand, LANGUAGE_ID};
use ropey::Rope;
use tower_lsp::lsp_types::{ServerInfo, TextDocumentContentChangeEvent, Url};
use tower_lsp::Client;

use super::text::apply_incremental_change_rope;

/// In-memory representation of an open ezsql document.
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub(crate) content: Rope,
    pub(crate) version: i32,
}

/// Primary LSP server state shared across handlers.
pub(crate) struct EzsqlLanguageServer {
    pub(crate) client: Client,
    pub(crate) documents: Arc<DashMap<Url, Document>>,
    pub(crate) config: Mutex<super::config::ServerConfig>,
    pub(crate) commands: Vec<Box<dyn CommandCapability + Send + Sync>>,
}

impl EzsqlLanguageServer {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DashMap::new()),
            config: Mutex::new(super::config::ServerConfig::default()),
            commands: vec![Box::new(HelloWorldCommand)],
        }
    }

    pub(crate) fn command(&self, id: &str) -> Option<&(dyn CommandCapability + Send + Sync)> {
        self.commands.iter().find(|c| c.id() == id).map(|c| c.as_ref())
    }

    pub(crate) fn command_ids(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.id().to_string()).collect()
    }

    /// Snapshot of a document's text; `None` when the document is not open.
    pub(crate) fn snapshot(&self, uri: &Url) -> Option<Rope> {
        self.documents.get(uri).map(|doc| doc.content.clone())
    }
}

pub(crate) fn server_info() -> ServerInfo {
    ServerInfo {
        name: format!("{LANGUAGE_ID} Language Server"),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

/// Apply edits to an open document. Returns false, leaving the store untouched,
/// when `uri` was never opened.
pub(crate) fn apply_document_changes(
    documents: &DashMap<Url, Document>,
    uri: &Url,
    version: i32,
    changes: &[TextDocumentContentChangeEvent],
) -> bool {
    let Some(mut doc) = documents.get_mut(uri) else {
        return false;
    };
    doc.version = version;
    for change in changes {
        apply_incremental_change_rope(&mut doc.content, change);
    }
    true
}
