use std::fs;
use std::path::Path;

use super::dto::{ToolDocument, ToolSource};
use crate::error::{RelayError, Result};

/// Reads every `*.yaml`, `*.yml` and `*.toml` file in `dir`, ordered by file
/// name. A missing directory yields no sources.
pub fn load_sources_from_dir(dir: &Path) -> Result<Vec<ToolSource>> {
    if !dir.is_dir() {
        tracing::info!("No connectors directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut paths = fs::read_dir(dir)
        .map_err(|e| {
            RelayError::config_error(format!("failed to read {}: {}", dir.display(), e))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && document_format(path).is_some())
        .collect::<Vec<_>>();
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path).map_err(|e| {
            RelayError::config_error(format!("failed to read {}: {}", path.display(), e))
        })?;
        let document = parse_document(&path, &content)?;
        tracing::debug!(
            "Loaded {} tool(s) from {}",
            document.tools.len(),
            path.display()
        );
        sources.push(ToolSource {
            origin: path.display().to_string(),
            document,
        });
    }
    Ok(sources)
}

pub fn parse_document(path: &Path, content: &str) -> Result<ToolDocument> {
    match document_format(path) {
        Some(Format::Yaml) => {
            // An empty YAML file deserializes to null, not to a mapping
            if content.trim().is_empty() {
                return Ok(ToolDocument::default());
            }
            serde_yaml::from_str(content).map_err(|err| match err.location() {
                Some(loc) => RelayError::config_error(format!(
                    "YAML parse error at {}:{} in {}: {}",
                    loc.line(),
                    loc.column(),
                    path.display(),
                    err
                )),
                None => RelayError::config_error(format!(
                    "YAML parse error in {}: {}",
                    path.display(),
                    err
                )),
            })
        }
        Some(Format::Toml) => toml::from_str(content).map_err(|err| {
            RelayError::config_error(format!("TOML parse error in {}: {}", path.display(), err))
        }),
        None => Err(RelayError::config_error(format!(
            "unsupported connector file: {}",
            path.display()
        ))),
    }
}

enum Format {
    Yaml,
    Toml,
}

fn document_format(path: &Path) -> Option<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Some(Format::Yaml),
        Some("toml") => Some(Format::Toml),
        _ => None,
    }
}
