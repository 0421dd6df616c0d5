use anyhow::Context;
use std::path::{Component, Path};

use ezsql_core::{DefinitionCapability, ImportStatement, TextDocument, scan_head_imports};
use serde::Serialize;

use super::config::ServerConfig;

const USAGE: &str = "Usage: ezsql-lsp --analyze [--imports-only] <relative-file-path>\n  --analyze <file>     : Header imports and resolved import targets as JSON\n  --imports-only       : Skip definition resolution";

#[derive(Debug, Serialize)]
pub(crate) struct FileReport {
    pub(crate) file: String,
    pub(crate) imports: Vec<ImportStatement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) definitions: Option<Vec<ResolvedImport>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResolvedImport {
    pub(crate) line: usize,
    pub(crate) path: String,
    pub(crate) target: Option<String>,
}

pub(crate) fn try_cli_analyze() -> anyhow::Result<Option<String>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() <= 1 {
        return Ok(None);
    }

    if let Some(i) = args.iter().position(|a| a == "--analyze") {
        let mut path_index = i + 1;
        while path_index < args.len() && args[path_index].starts_with("--") {
            path_index += 1;
        }

        let path = args
            .get(path_index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!(USAGE))?;
        let imports_only = args.iter().any(|a| a == "--imports-only");

        if !is_safe_path(&path) {
            return Err(anyhow::anyhow!("Unsafe file path: {}", path));
        }
        let report = analyze_file(Path::new(&path), imports_only, &ServerConfig::default())?;
        return Ok(Some(serde_json::to_string_pretty(&report)?));
    }

    Ok(None)
}

pub(crate) fn analyze_file(path: &Path, imports_only: bool, config: &ServerConfig) -> anyhow::Result<FileReport> {
    // Resolution walks parent directories, which needs an absolute path
    let abs = std::fs::canonicalize(path).with_context(|| format!("Failed to resolve path '{}'", path.display()))?;
    let doc = TextDocument::open(&abs)?;
    let imports = scan_head_imports(&doc);

    let definitions = if imports_only {
        None
    } else {
        let capability = config.definition();
        let resolved = doc
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let m = ezsql_core::match_import(line)?;
                let target = capability
                    .definition(&abs, &doc, idx)
                    .map(|link| link.target.display().to_string());
                Some(ResolvedImport {
                    line: idx,
                    path: m.path.to_string(),
                    target,
                })
            })
            .collect();
        Some(resolved)
    };

    Ok(FileReport {
        file: path.display().to_string(),
        imports,
        definitions,
    })
}

pub(crate) fn is_safe_path(path: &str) -> bool {
    let path = Path::new(path);

    if path.as_os_str().is_empty() {
        return false;
    }
    if path.is_absolute() {
        return false;
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return false;
    }

    let s = path.to_string_lossy();
    let suspicious = ['\0', '\n', '\r', '\t'];
    if s.chars().any(|c| suspicious.contains(&c)) {
        return false;
    }
    if s.len() >= 2 {
        let bytes = s.as_bytes();
        if bytes[1] == b':' {
            return false;
        }
    }
    true
}
