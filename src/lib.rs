//! # HelmScan
//!
//! Discovers the Helm charts deployed by Terraform modules.
//!
//! HelmScan reads the `*.tf` files of a set of module directories, finds
//! `helm_release` resources, resolves chart versions written as
//! `${var.NAME}` against a variable-definitions file, and reports chart,
//! repository and version for each release.
//!
//! ## Modes
//!
//! - **Registry** (default): a release needs `name` and `version`; chart and
//!   repository are taken from a chart registry manifest, and the record
//!   notes which variable supplied the version
//! - **Basic**: a release needs `chart`, `repository` and `version`, which
//!   are reported as written (version resolved)
//!
//! ## Example
//!
//! ```rust,no_run
//! use helmscan::{Config, Discovery, ReportFormat};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let result = Discovery::new(config).run().await?;
//!
//!     let report = result.generate_report(ReportFormat::Json)?;
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{HelmScanError, Result};
pub use types::{
    ChartRegistry, ChartRegistryEntry, DiscoveryMode, DiscoveryResult, ReleaseRecord,
    ReportFormat, VariableDeclaration, VariableTable,
};

use discovery::Extraction;
use std::path::PathBuf;

/// Discovery orchestrator that coordinates loading, extraction and
/// aggregation.
///
/// All inputs (module directories, variables file, chart registry) come
/// from the [`Config`] it is built with.
///
/// # Example
///
/// ```rust,no_run
/// use helmscan::{Config, Discovery, DiscoveryMode};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> anyhow::Result<()> {
///     let mut config = Config::default();
///     config.scan.mode = DiscoveryMode::Basic;
///     config.scan.module_dirs = vec!["./modules/helm".into()];
///
///     let result = Discovery::new(config).run().await?;
///     println!("Found {} releases", result.records.len());
///     Ok(())
/// }
/// ```
pub struct Discovery {
    config: Config,
    parser: parser::HclParser,
}

impl Discovery {
    /// Create a new discovery run with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let parser = parser::HclParser::new(&config);
        Self { config, parser }
    }

    /// List module files across all configured module directories.
    ///
    /// Directories keep their configured order; files within a directory
    /// are sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if a module directory doesn't exist.
    pub fn module_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for dir in &self.config.scan.module_dirs {
            tracing::info!(dir = %dir.display(), "Scanning module directory");
            files.extend(self.parser.module_files(dir)?);
        }
        Ok(files)
    }

    /// Build the variable table from the configured variables file.
    ///
    /// Without a configured file the table is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub async fn variable_table(&self) -> Result<VariableTable> {
        match &self.config.scan.variables_file {
            Some(path) => discovery::load_variable_table(&self.parser, path).await,
            None => {
                tracing::debug!("No variables file configured, references stay unresolved");
                Ok(VariableTable::new())
            }
        }
    }

    /// Load the configured chart registry.
    ///
    /// # Errors
    ///
    /// Returns an error if no registry is configured or it can't be loaded.
    pub async fn chart_registry(&self) -> Result<ChartRegistry> {
        let Some(path) = &self.config.registry.path else {
            return Err(crate::err!(ConfigMissing {
                key: "registry.path (required in registry mode)".to_string(),
            }));
        };
        let registry = parser::load_chart_registry(path).await?;
        tracing::info!(path = %path.display(), charts = registry.len(), "Chart registry loaded");
        Ok(registry)
    }

    /// Run discovery over every configured module directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any input file
    /// is missing, unreadable, or malformed. No partial result is returned.
    pub async fn run(&self) -> Result<DiscoveryResult> {
        self.config.validate()?;

        let mode = self.config.scan.mode;
        let files = self.module_files()?;
        let variables = self.variable_table().await?;

        let records = match mode {
            DiscoveryMode::Basic => {
                discovery::process_module_files(&self.parser, &files, &variables, Extraction::Basic)
                    .await?
            }
            DiscoveryMode::Registry => {
                let registry = self.chart_registry().await?;
                discovery::process_module_files(
                    &self.parser,
                    &files,
                    &variables,
                    Extraction::Registry(&registry),
                )
                .await?
            }
        };

        tracing::info!(
            mode = %mode,
            files = files.len(),
            records = records.len(),
            "Discovery complete"
        );

        Ok(DiscoveryResult {
            records,
            files_scanned: files,
            mode,
        })
    }
}

impl DiscoveryResult {
    /// Generate a report with the default output options.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate_report(&self, format: ReportFormat) -> Result<String> {
        let config = Config::default();
        let reporter = reporter::Reporter::new(&config);
        reporter.generate(self, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn basic_config(root: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.scan.mode = DiscoveryMode::Basic;
        config.scan.module_dirs = vec![root.join("modules")];
        config.scan.variables_file = Some(root.join("inputs.tf"));
        config.registry.path = None;
        config
    }

    #[tokio::test]
    async fn test_run_basic_mode() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("modules")).unwrap();
        fs::write(
            dir.path().join("inputs.tf"),
            "variable \"nginx_version\" {\n  default = \"1.2.3\"\n}\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("modules/helm.tf"),
            "resource \"helm_release\" \"nginx\" {\n  chart = \"nginx\"\n  repository = \"https://x/stable\"\n  version = \"${var.nginx_version}\"\n}\n",
        )
        .unwrap();

        let result = Discovery::new(basic_config(dir.path())).run().await.unwrap();

        assert_eq!(
            result.records,
            vec![ReleaseRecord::new("nginx", "https://x/stable", "1.2.3")]
        );
        assert_eq!(result.files_scanned, vec![dir.path().join("modules/helm.tf")]);
        assert_eq!(result.mode, DiscoveryMode::Basic);
    }

    #[tokio::test]
    async fn test_run_without_variables_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("modules")).unwrap();
        fs::write(
            dir.path().join("modules/helm.tf"),
            "resource \"helm_release\" \"nginx\" {\n  chart = \"nginx\"\n  repository = \"https://x/stable\"\n  version = \"${var.nginx_version}\"\n}\n",
        )
        .unwrap();

        let mut config = basic_config(dir.path());
        config.scan.variables_file = None;
        let result = Discovery::new(config).run().await.unwrap();

        assert_eq!(result.records[0].version, "${var.nginx_version}");
    }

    #[tokio::test]
    async fn test_run_missing_variables_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("modules")).unwrap();

        let result = Discovery::new(basic_config(dir.path())).run().await;

        assert!(matches!(result, Err(HelmScanError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_run_registry_mode_without_registry() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = basic_config(dir.path());
        config.scan.mode = DiscoveryMode::Registry;

        let result = Discovery::new(config).run().await;

        assert!(matches!(result, Err(HelmScanError::ConfigMissing { .. })));
    }

    #[test]
    fn test_generate_report_for_empty_result() {
        let report = DiscoveryResult::default()
            .generate_report(ReportFormat::Json)
            .unwrap();
        assert_eq!(report, "[]");
    }
}
