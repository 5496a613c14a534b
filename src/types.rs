//! Core data types used throughout HelmScan.
//!
//! This module defines the typed schema that decoded configuration is
//! mapped into at the loader boundary:
//! - Variable declarations and the variable table they form
//! - Chart registry entries
//! - `helm_release` instances and the records extracted from them
//! - Discovery modes and report formats

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A `variable` block from a variable-definitions file.
///
/// # Example HCL
///
/// ```hcl
/// variable "nginx_version" {
///   default = "1.2.3"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// The block label. Matched case-insensitively during resolution.
    pub name: String,

    /// The `default` attribute, if declared
    pub default: Option<String>,
}

impl VariableDeclaration {
    /// Create a declaration with an optional default.
    #[must_use]
    pub fn new(name: impl Into<String>, default: Option<&str>) -> Self {
        Self {
            name: name.into(),
            default: default.map(String::from),
        }
    }
}

/// Ordered list of variable declarations.
///
/// Duplicate names are kept; lookups scan every entry and the first
/// case-insensitive match wins. The table is never mutated after it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTable {
    declarations: Vec<VariableDeclaration>,
}

impl VariableTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the first declaration whose name equals `name`, ignoring case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&VariableDeclaration> {
        let wanted = name.to_lowercase();
        self.declarations
            .iter()
            .find(|decl| decl.name.to_lowercase() == wanted)
    }

    /// Number of declarations, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the table has no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.declarations.iter()
    }
}

impl FromIterator<VariableDeclaration> for VariableTable {
    fn from_iter<I: IntoIterator<Item = VariableDeclaration>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
        }
    }
}

/// One entry of the chart registry manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRegistryEntry {
    /// Chart name, the registry key
    pub chart: String,

    /// Canonical repository URL for the chart
    pub repository: String,
}

impl ChartRegistryEntry {
    /// Create a registry entry.
    #[must_use]
    pub fn new(chart: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            repository: repository.into(),
        }
    }
}

/// Static chart-name to repository lookup table.
///
/// Mirrors the manifest layout:
///
/// ```yaml
/// charts:
///   - chart: nginx
///     repository: https://charts.helm.sh/stable
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRegistry {
    /// Entries in manifest order
    pub charts: Vec<ChartRegistryEntry>,
}

impl ChartRegistry {
    /// Create a registry from entries.
    #[must_use]
    pub fn new(charts: Vec<ChartRegistryEntry>) -> Self {
        Self { charts }
    }

    /// Find the first entry whose `chart` equals `name` exactly.
    ///
    /// Later entries with the same chart name are unreachable.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ChartRegistryEntry> {
        self.charts.iter().find(|entry| entry.chart == name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// A `resource "helm_release" "<instance>"` block.
///
/// Every attribute is optional here; which ones are required depends on
/// the discovery mode. Values are literal strings or interpolation
/// expressions such as `${var.nginx_version}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmReleaseInstance {
    /// Instance label; used for logging only
    pub instance_name: String,
    /// Release name (`name` attribute)
    pub name: Option<String>,
    /// Chart name (`chart` attribute)
    pub chart: Option<String>,
    /// Chart repository (`repository` attribute)
    pub repository: Option<String>,
    /// Chart version (`version` attribute)
    pub version: Option<String>,
}

/// Typed view of one decoded Terraform file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModule {
    /// File the content was decoded from
    pub file: PathBuf,
    /// `variable` blocks in declaration order
    pub variables: Vec<VariableDeclaration>,
    /// `helm_release` instances in declaration order
    pub releases: Vec<HelmReleaseInstance>,
}

/// Outcome of resolving a value with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// The resolved default, or the input string unchanged
    pub value: String,
    /// The variable the value was referenced through, if it was a reference
    pub variable_name: Option<String>,
}

impl ResolvedReference {
    /// A value that was not a variable reference.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            variable_name: None,
        }
    }
}

/// Where a record's version came from. Present on registry-mode records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionOrigin {
    /// Referenced variable, `null` for literal versions
    pub variable_name: Option<String>,
}

/// One discovered chart with its resolved version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    /// Chart name
    pub chart: String,
    /// Chart repository URL
    pub repository: String,
    /// Final version value
    pub version: String,
    /// Version provenance; flattened so it appears as `variable_name`
    #[serde(flatten)]
    pub origin: Option<VersionOrigin>,
}

impl ReleaseRecord {
    /// A record without provenance, as produced in basic mode.
    #[must_use]
    pub fn new(chart: impl Into<String>, repository: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            repository: repository.into(),
            version: version.into(),
            origin: None,
        }
    }

    /// Attach version provenance, as produced in registry mode.
    #[must_use]
    pub fn with_variable_name(mut self, variable_name: Option<String>) -> Self {
        self.origin = Some(VersionOrigin { variable_name });
        self
    }

    /// The variable the version came from, if recorded.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        self.origin
            .as_ref()
            .and_then(|origin| origin.variable_name.as_deref())
    }
}

/// How `helm_release` instances are turned into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Require `chart`, `repository`, `version`; pass chart and repository through
    Basic,
    /// Require `name`, `version`; take chart and repository from the chart registry
    #[default]
    Registry,
}

impl std::fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Registry => write!(f, "registry"),
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// JSON array of records
    #[default]
    Json,
    /// Plain text table
    Text,
}

/// Result of a full discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    /// Records in file-scan order, then declaration order
    pub records: Vec<ReleaseRecord>,
    /// Module files that were scanned, in scan order
    pub files_scanned: Vec<PathBuf>,
    /// Mode the records were extracted in
    pub mode: DiscoveryMode,
}
