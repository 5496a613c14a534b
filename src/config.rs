//! Configuration module for HelmScan.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`helmscan.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # helmscan.yaml
//!
//! # Scanning options
//! scan:
//!   module_dirs:
//!     - modules/eks_base
//!     - modules/eks_post_config
//!   variables_file: templates/eks/inputs.tf
//!   exclude_patterns:
//!     - "override*.tf"
//!   mode: registry
//!
//! # Chart registry manifest
//! registry:
//!   path: ${CHART_REGISTRY}  # Environment variable expansion
//!
//! # Output options
//! output:
//!   format: json
//!   pretty: true
//!   colored: true
//! ```

use crate::error::{HelmScanError, Result};
use crate::types::{DiscoveryMode, ReportFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

static BRACED_ENV_VAR: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

static BARE_ENV_VAR: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex"));

/// Scanning options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Module directories whose `*.tf` files are scanned, in order.
    pub module_dirs: Vec<PathBuf>,

    /// Variable-definitions file used to resolve `${var.<name>}` references.
    pub variables_file: Option<PathBuf>,

    /// File-name glob patterns to exclude from scanning.
    pub exclude_patterns: Vec<String>,

    /// Extraction mode.
    pub mode: DiscoveryMode,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            module_dirs: vec![
                PathBuf::from("modules/eks_base"),
                PathBuf::from("modules/eks_post_config"),
            ],
            variables_file: Some(PathBuf::from("templates/eks/inputs.tf")),
            exclude_patterns: Vec::new(),
            mode: DiscoveryMode::default(),
        }
    }
}

/// Chart registry options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Path to the chart registry manifest.
    pub path: Option<PathBuf>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(".github/config/chart.yaml")),
        }
    }
}

/// Output options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Report format.
    pub format: ReportFormat,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Use colored output in text reports.
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            pretty: true,
            colored: true,
        }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanning options
    pub scan: ScanOptions,

    /// Chart registry options
    pub registry: RegistryOptions,

    /// Output options
    pub output: OutputOptions,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        let expanded = expand_env_vars(content);

        if expanded.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&expanded).map_err(|e| {
            HelmScanError::config_parse(e.to_string(), Some(Box::new(e)), file!(), line!())
        })?;

        tracing::debug!(
            module_dirs = config.scan.module_dirs.len(),
            mode = %config.scan.mode,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Check that the configuration can drive a discovery run.
    ///
    /// # Errors
    ///
    /// Returns an error if no module directory is configured, or if
    /// registry mode is selected without a registry manifest.
    pub fn validate(&self) -> Result<()> {
        if self.scan.module_dirs.is_empty() {
            return Err(crate::err!(ConfigMissing {
                key: "scan.module_dirs".to_string(),
            }));
        }

        if self.scan.mode == DiscoveryMode::Registry && self.registry.path.is_none() {
            return Err(crate::err!(ConfigMissing {
                key: "registry.path (required in registry mode)".to_string(),
            }));
        }

        if let Some(pattern) = self
            .scan
            .exclude_patterns
            .iter()
            .find(|p| glob::Pattern::new(p).is_err())
        {
            return Err(crate::err!(ConfigValue {
                key: "scan.exclude_patterns".to_string(),
                message: format!("invalid glob pattern '{pattern}'"),
            }));
        }

        Ok(())
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r"# HelmScan Configuration File

# Scanning options
scan:
  # Module directories to scan for *.tf files (non-recursive, in order)
  module_dirs:
    - modules/eks_base
    - modules/eks_post_config

  # Variable definitions used to resolve ${var.NAME} chart versions
  variables_file: templates/eks/inputs.tf

  # File-name patterns to skip (glob patterns)
  exclude_patterns: []

  # Extraction mode:
  #   registry - helm_release needs name + version; chart/repository come from the registry
  #   basic    - helm_release needs chart + repository + version
  mode: registry

# Chart registry manifest (required in registry mode)
registry:
  path: .github/config/chart.yaml

# Output options
output:
  # json or text
  format: json

  # Pretty-print JSON output
  pretty: true

  # Use colored output in text reports
  colored: true
"
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::ScanArgs) {
        if !args.module_dirs.is_empty() {
            self.scan.module_dirs.clone_from(&args.module_dirs);
        }
        if let Some(ref variables) = args.variables {
            self.scan.variables_file = Some(variables.clone());
        }
        if !args.exclude_patterns.is_empty() {
            self.scan
                .exclude_patterns
                .extend(args.exclude_patterns.iter().cloned());
        }
        if let Some(ref registry) = args.registry {
            self.registry.path = Some(registry.clone());
        }
        if let Some(mode) = args.mode {
            self.scan.mode = mode;
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if args.compact {
            self.output.pretty = false;
        }
        if args.no_color {
            self.output.colored = false;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. Unset variables are left as-is.
fn expand_env_vars(content: &str) -> String {
    let braced = BRACED_ENV_VAR.replace_all(content, |caps: &regex::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });

    BARE_ENV_VAR
        .replace_all(&braced, |caps: &regex::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
