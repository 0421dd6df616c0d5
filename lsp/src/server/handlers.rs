use ropey::Rope;
use serde_json::Value;
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{debug, info, warn};

use ezsql_core::{CommandOutput, CompletionCapability, LANGUAGE_ID};

use super::{
    completion::completion_items,
    definition::definition_links,
    state::{apply_document_changes, server_info, Document, EzsqlLanguageServer},
};

#[tower_lsp::async_trait]
impl LanguageServer for EzsqlLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("ezsql language server initializing with params: {:?}", params.root_uri);

        let trigger_characters = self.current_config().completion().trigger_characters();

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                completion_provider: Some(CompletionOptions {
                    // Resolving an item adds nothing
                    resolve_provider: Some(false),
                    trigger_characters: Some(trigger_characters),
                    work_done_progress_options: Default::default(),
                    all_commit_characters: None,
                    completion_item: None,
                }),
                definition_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: self.command_ids(),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(server_info()),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("ezsql language server initialized");
        let _ = self
            .client
            .log_message(MessageType::INFO, "ezsql language server started")
            .await;
        self.load_config().await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("ezsql language server shutting down");
        Ok(())
    }

    async fn did_change_configuration(&self, _params: DidChangeConfigurationParams) {
        self.load_config().await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        if params.text_document.language_id != LANGUAGE_ID {
            debug!(%uri, language_id = %params.text_document.language_id, "opened document is not {}", LANGUAGE_ID);
        }
        debug!(%uri, version = params.text_document.version, "document opened");
        self.documents.insert(
            uri,
            Document {
                content: Rope::from_str(&params.text_document.text),
                version: params.text_document.version,
            },
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let applied = apply_document_changes(
            &self.documents,
            &uri,
            params.text_document.version,
            &params.content_changes,
        );
        if !applied {
            debug!(%uri, "ignoring changes to a document that was never opened");
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        if let Some((uri, doc)) = self.documents.remove(&params.text_document.uri) {
            debug!(%uri, version = doc.version, "document closed");
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        // Unknown documents still get the keyword list
        let content = self.snapshot(uri).unwrap_or_default();
        let capability = self.current_config().completion();
        let items = completion_items(&content, position, &capability);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn goto_definition(&self, params: GotoDefinitionParams) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let config = self.current_config();
        if !config.definition_enabled {
            return Ok(None);
        }
        let Some(content) = self.snapshot(uri) else {
            return Ok(None);
        };

        let links = definition_links(uri, &content, position, &config.definition());
        if links.is_none() {
            debug!(%uri, line = position.line, "no definition");
        }
        Ok(links.map(GotoDefinitionResponse::Link))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        let Some(command) = self.command(&params.command) else {
            warn!("unknown command: {}", params.command);
            return Ok(None);
        };

        match command.invoke() {
            CommandOutput::Info(message) => {
                self.client.show_message(MessageType::INFO, message).await;
            }
        }
        Ok(None)
    }
}
