//! Chart registry manifest loading.

use crate::error::{HelmScanError, Result};
use crate::types::ChartRegistry;
use std::path::Path;

/// Load the chart registry from a YAML manifest.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a valid manifest.
pub async fn load_chart_registry(path: &Path) -> Result<ChartRegistry> {
    tracing::debug!(path = %path.display(), "Loading chart registry");
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| HelmScanError::io(path, e, file!(), line!()))?;

    parse_chart_registry(&content, path)
}

/// Decode a chart registry manifest.
///
/// A manifest without a `charts` key is an empty registry. Entries must
/// carry both `chart` and `repository`.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or an entry is incomplete.
pub fn parse_chart_registry(content: &str, path: &Path) -> Result<ChartRegistry> {
    if content.trim().is_empty() {
        return Ok(ChartRegistry::default());
    }

    let registry: ChartRegistry = serde_yaml::from_str(content).map_err(|e| crate::err!(RegistryParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    }))?;

    tracing::debug!(path = %path.display(), charts = registry.len(), "Chart registry loaded");
    Ok(registry)
}
