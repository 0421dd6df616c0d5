use ezsql_core::resolve::{DEFAULT_EXTENSION, DEFAULT_SOURCE_DIR};
use ezsql_core::{EzsqlCompletion, EzsqlDefinition, ResolveOptions};
use serde::Deserialize;
use tower_lsp::lsp_types::ConfigurationItem;
use tracing::{debug, warn};

use super::state::EzsqlLanguageServer;

pub(crate) const CONFIG_SECTION: &str = "ezsql.lsp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    pub(crate) import_completion: bool,
    pub(crate) definition_enabled: bool,
    pub(crate) source_dir: String,
    pub(crate) file_extension: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            import_completion: true,
            definition_enabled: true,
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            file_extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EzsqlLspConfigSection {
    #[serde(default)]
    completion: CompletionConfig,
    #[serde(default)]
    definition: DefinitionConfig,
    #[serde(default)]
    project: ProjectConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CompletionConfig {
    #[serde(default)]
    imports: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DefinitionConfig {
    #[serde(default)]
    enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProjectConfig {
    #[serde(default)]
    source_dir: Option<String>,
    #[serde(default)]
    file_extension: Option<String>,
}

impl ServerConfig {
    /// Overlay a client-provided section; absent fields fall back to defaults.
    pub(crate) fn from_section(cfg: EzsqlLspConfigSection) -> Self {
        let mut out = Self {
            import_completion: cfg.completion.imports.unwrap_or(true),
            definition_enabled: cfg.definition.enabled.unwrap_or(true),
            ..Self::default()
        };

        if let Some(v) = cfg.project.source_dir.filter(|v| !v.trim().is_empty()) {
            out.source_dir = v;
        }
        if let Some(v) = cfg.project.file_extension.filter(|v| !v.trim().is_empty()) {
            out.file_extension = v.trim_start_matches('.').to_string();
        }
        out
    }

    pub(crate) fn completion(&self) -> EzsqlCompletion {
        EzsqlCompletion {
            import_references: self.import_completion,
        }
    }

    pub(crate) fn definition(&self) -> EzsqlDefinition {
        EzsqlDefinition {
            options: ResolveOptions {
                source_dir: self.source_dir.clone(),
                extension: self.file_extension.clone(),
            },
        }
    }
}

impl EzsqlLanguageServer {
    pub(crate) async fn load_config(&self) {
        let items = vec![ConfigurationItem {
            scope_uri: None,
            section: Some(CONFIG_SECTION.to_string()),
        }];

        let Ok(values) = self.client.configuration(items).await else {
            debug!("client did not answer workspace/configuration");
            return;
        };
        let Some(val) = values.into_iter().next() else {
            return;
        };
        if val.is_null() {
            return;
        }

        match serde_json::from_value::<EzsqlLspConfigSection>(val) {
            Ok(section) => {
                let cfg = ServerConfig::from_section(section);
                debug!(?cfg, "loaded configuration");
                if let Ok(mut guard) = self.config.lock() {
                    *guard = cfg;
                }
            }
            Err(e) => warn!("ignoring malformed {} configuration: {}", CONFIG_SECTION, e),
        }
    }

    pub(crate) fn current_config(&self) -> ServerConfig {
        self.config.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ServerConfig {
        let section: EzsqlLspConfigSection = serde_json::from_value(value).expect("section");
        ServerConfig::from_section(section)
    }

    #[test]
    fn test_empty_section_is_default() {
        assert_eq!(parse(json!({})), ServerConfig::default());
    }

    #[test]
    fn test_section_overrides() {
        let cfg = parse(json!({
            "completion": { "imports": false },
            "definition": { "enabled": false },
            "project": { "sourceDir": "sql", "fileExtension": ".esql" }
        }));
        assert!(!cfg.import_completion);
        assert!(!cfg.definition_enabled);
        assert_eq!(cfg.source_dir, "sql");
        assert_eq!(cfg.file_extension, "esql");
        assert_eq!(cfg.definition().options.extension, "esql");
        assert!(!cfg.completion().import_references);
    }

    #[test]
    fn test_blank_strings_are_ignored() {
        let cfg = parse(json!({ "project": { "sourceDir": "  ", "fileExtension": "" } }));
        assert_eq!(cfg.source_dir, "src");
        assert_eq!(cfg.file_extension, "ezsql");
    }
}
