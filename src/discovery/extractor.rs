//! Resource extraction from decoded modules.
//!
//! Instances that lack an attribute their mode requires are skipped without
//! error, and do not affect sibling instances.

use super::resolver::{resolve_reference, resolve_reference_with_origin};
use crate::types::{ChartRegistry, HelmReleaseInstance, ParsedModule, ReleaseRecord, VariableTable};

/// Which extraction contract to apply to each instance.
#[derive(Debug, Clone, Copy)]
pub enum Extraction<'a> {
    /// Pass `chart` and `repository` through, resolve `version`.
    Basic,
    /// Match `name` against the registry, resolve `version` with provenance.
    Registry(&'a ChartRegistry),
}

/// Extract records from a module using the given contract.
#[must_use]
pub fn extract_releases(module: &ParsedModule, variables: &VariableTable, extraction: Extraction<'_>) -> Vec<ReleaseRecord> {
    match extraction {
        Extraction::Basic => extract_basic(module, variables),
        Extraction::Registry(registry) => extract_with_registry(module, variables, registry),
    }
}

/// Extract records from instances carrying `chart`, `repository` and `version`.
#[must_use]
pub fn extract_basic(module: &ParsedModule, variables: &VariableTable) -> Vec<ReleaseRecord> {
    module
        .releases
        .iter()
        .filter_map(|instance| {
            let (Some(chart), Some(repository), Some(version)) =
                (&instance.chart, &instance.repository, &instance.version)
            else {
                log_skipped(module, instance, "missing chart, repository or version");
                return None;
            };

            Some(ReleaseRecord::new(
                chart.clone(),
                repository.clone(),
                resolve_reference(version, variables),
            ))
        })
        .collect()
}

/// Extract records from instances carrying `name` and `version`, enriched
/// from the chart registry.
///
/// Instances whose `name` has no registry entry are dropped.
#[must_use]
pub fn extract_with_registry(
    module: &ParsedModule,
    variables: &VariableTable,
    registry: &ChartRegistry,
) -> Vec<ReleaseRecord> {
    module
        .releases
        .iter()
        .filter_map(|instance| {
            let (Some(name), Some(version)) = (&instance.name, &instance.version) else {
                log_skipped(module, instance, "missing name or version");
                return None;
            };

            let resolved = resolve_reference_with_origin(version, variables);

            let Some(entry) = registry.lookup(name) else {
                log_skipped(module, instance, "chart not in registry");
                return None;
            };

            Some(
                ReleaseRecord::new(entry.chart.clone(), entry.repository.clone(), resolved.value)
                    .with_variable_name(resolved.variable_name),
            )
        })
        .collect()
}

fn log_skipped(module: &ParsedModule, instance: &HelmReleaseInstance, reason: &str) {
    tracing::debug!(
        file = %module.file.display(),
        instance = %instance.instance_name,
        reason,
        "Skipping helm_release"
    );
}
